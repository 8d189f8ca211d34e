//! Page rasterization and output writing

pub mod font;
pub mod naming;
pub mod page;
pub mod pipeline;
pub mod report;
pub mod theme;

pub use font::FontFace;
pub use naming::page_file_name;
pub use page::PageRenderer;
pub use pipeline::{
    remove_page_files, DocumentRenderer, RenderEvent, RenderObserver, RenderOutcome, SilentObserver,
};
pub use report::{write_manifest, MANIFEST_FILE_NAME};
pub use theme::Theme;
