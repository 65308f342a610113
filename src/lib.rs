#![forbid(unsafe_code)]

pub mod chance;
pub mod config;
pub mod error;
pub mod ledger;
pub mod pipeline;
pub mod render;
pub mod render_process;
pub mod request;
pub mod resolve;
pub mod sidecar;

pub use chance::Chance;
pub use config::EngineConfig;
pub use error::{PapergenError, PapergenResult};
pub use pipeline::generate_record;
pub use render::{PaperRenderer, RendererKind, create_renderer};
pub use render_process::ProcessRenderer;
pub use request::{GridColorMode, RenderRequest, SidecarMode};
pub use resolve::{RenderOptions, Resolver};
