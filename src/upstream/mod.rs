pub mod interface;
pub mod google;

pub use interface::{SpeechSynthesisRequest, UpstreamClient, UpstreamError};
pub use google::GoogleUpstream;
