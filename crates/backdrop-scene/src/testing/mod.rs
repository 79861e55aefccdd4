//! Test doubles for the platform seams.

mod mock_host;

pub use mock_host::{MockHost, MockSurface, RecordingBackend};
