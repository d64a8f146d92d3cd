pub mod cinemeta;
pub mod moviebox;
pub mod pipeline;
