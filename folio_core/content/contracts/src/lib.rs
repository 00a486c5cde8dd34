use folio_models::content::{Event, EventCategoryFilter, Faq, Profile, Project, SkillSet};

/// Read-only access to the static site content. Everything is served in
/// source order, unpaginated.
#[cfg_attr(feature = "mock", mockall::automock)]
pub trait ContentService: Send + Sync + 'static {
    fn profile(&self) -> Profile;

    fn projects(&self) -> Vec<Project>;

    /// Events matching the selected category, or all of them for the
    /// sentinel. Exact equality, stable source order.
    fn events(&self, filter: EventCategoryFilter) -> Vec<Event>;

    fn faqs(&self) -> Vec<Faq>;

    fn skills(&self) -> SkillSet;
}
