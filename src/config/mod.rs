//! Configuration module

mod metadata;
mod site;

pub use metadata::SiteMetadata;
pub use site::AgentRule;
pub use site::HighlightConfig;
pub use site::LayoutConfig;
pub use site::LinkConfig;
pub use site::PolicyConfig;
pub use site::PopularPage;
pub use site::SiteConfig;
