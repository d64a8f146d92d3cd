use serde::Serialize;

/// Single playable stream candidate, display-ready
///
/// `name` is the short picker label (provider tag + quality), `title` the
/// multi-line description shown under it, `url` the playback link untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Stream {
    pub name: String,
    pub title: String,
    pub url: String,
}

/// Response envelope for the stream endpoint
///
/// The only shape the endpoint ever returns; resolution failures are an
/// empty `streams` list, never an error payload.
#[derive(Debug, Clone, Serialize)]
pub struct StreamsResponse {
    pub streams: Vec<Stream>,
}
