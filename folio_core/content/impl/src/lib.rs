use std::sync::Arc;

use folio_core_content_contracts::ContentService;
use folio_models::content::{
    Event, EventCategoryFilter, Faq, Profile, Project, SiteContent, SkillSet,
};

#[derive(Debug, Clone)]
pub struct ContentServiceImpl {
    content: Arc<SiteContent>,
}

impl ContentServiceImpl {
    pub fn new(content: Arc<SiteContent>) -> Self {
        Self { content }
    }
}

impl ContentService for ContentServiceImpl {
    fn profile(&self) -> Profile {
        self.content.profile.clone()
    }

    fn projects(&self) -> Vec<Project> {
        self.content.projects.clone()
    }

    fn events(&self, filter: EventCategoryFilter) -> Vec<Event> {
        filter_by_category(&self.content.events, filter)
    }

    fn faqs(&self) -> Vec<Faq> {
        self.content.faqs.clone()
    }

    fn skills(&self) -> SkillSet {
        self.content.skills.clone()
    }
}

/// Exact category match over the source list; the `all` sentinel returns
/// the list unchanged. Relative order is always preserved.
pub fn filter_by_category(events: &[Event], filter: EventCategoryFilter) -> Vec<Event> {
    match filter {
        EventCategoryFilter::All => events.to_vec(),
        EventCategoryFilter::Only(category) => events
            .iter()
            .filter(|event| event.category == category)
            .cloned()
            .collect(),
    }
}
