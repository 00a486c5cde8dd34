//! Embedded static site content: profile, projects, events, FAQ, and
//! skills. The data is baked into the binary; there is no persistence
//! layer behind it.

use std::sync::{Arc, LazyLock};

use folio_models::content::SiteContent;

const CONTENT_JSON: &str = include_str!("../assets/content.json");

static SITE_CONTENT: LazyLock<Arc<SiteContent>> = LazyLock::new(|| {
    // The asset is part of the crate, so a parse failure is a build defect.
    Arc::new(serde_json::from_str(CONTENT_JSON).expect("embedded site content is valid"))
});

pub fn site_content() -> Arc<SiteContent> {
    Arc::clone(&SITE_CONTENT)
}
