use crate::catalog::{Catalog, Category, Personality};

/// Personalities whose name or description contains `query`
/// (case-insensitive), restricted to `category` when one is given.
/// Catalog order is preserved; an empty query matches everything.
pub fn filter_personalities<'a>(
    catalog: &'a Catalog,
    query: &str,
    category: Option<Category>,
) -> Vec<&'a Personality> {
    let needle = query.to_lowercase();
    catalog
        .personalities()
        .iter()
        .filter(|p| category.map_or(true, |c| p.category == Some(c)))
        .filter(|p| {
            needle.is_empty()
                || p.name.to_lowercase().contains(&needle)
                || p.description.to_lowercase().contains(&needle)
        })
        .collect()
}

/// Search box, category filter and highlighted row of the personality list.
///
/// `cursor` indexes into [`visible`](Self::visible) and is clamped whenever
/// the filter changes. `selected` is the id the chat is bound to and survives
/// filtering even when that personality is currently hidden.
#[derive(Debug, Default, Clone)]
pub struct Sidebar {
    query: String,
    category: Option<Category>,
    cursor: usize,
    selected: Option<String>,
}

impl Sidebar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn category(&self) -> Option<Category> {
        self.category
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn visible<'a>(&self, catalog: &'a Catalog) -> Vec<&'a Personality> {
        filter_personalities(catalog, &self.query, self.category)
    }

    pub fn set_query(&mut self, catalog: &Catalog, query: impl Into<String>) {
        self.query = query.into();
        self.clamp(catalog);
    }

    pub fn push_char(&mut self, catalog: &Catalog, c: char) {
        self.query.push(c);
        self.clamp(catalog);
    }

    pub fn pop_char(&mut self, catalog: &Catalog) {
        self.query.pop();
        self.clamp(catalog);
    }

    pub fn set_category(&mut self, catalog: &Catalog, category: Option<Category>) {
        self.category = category;
        self.clamp(catalog);
    }

    pub fn move_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_down(&mut self, catalog: &Catalog) {
        let n = self.visible(catalog).len();
        if self.cursor + 1 < n {
            self.cursor += 1;
        }
    }

    /// Bind the chat to the highlighted row. Returns the newly selected id,
    /// or `None` when the list is empty.
    pub fn select_current(&mut self, catalog: &Catalog) -> Option<String> {
        let id = self.visible(catalog).get(self.cursor)?.id.clone();
        self.selected = Some(id.clone());
        Some(id)
    }

    /// Bind the chat to `id` directly and move the cursor onto it if visible.
    pub fn select_id(&mut self, catalog: &Catalog, id: &str) -> bool {
        if catalog.get(id).is_none() {
            return false;
        }
        self.selected = Some(id.to_string());
        if let Some(i) = self.visible(catalog).iter().position(|p| p.id == id) {
            self.cursor = i;
        }
        true
    }

    fn clamp(&mut self, catalog: &Catalog) {
        let n = self.visible(catalog).len();
        self.cursor = self.cursor.min(n.saturating_sub(1));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(list: &[&Personality]) -> Vec<String> {
        list.iter().map(|p| p.id.clone()).collect()
    }

    #[test]
    fn empty_query_matches_whole_catalog() {
        let catalog = Catalog::builtin();
        assert_eq!(ids(&filter_personalities(&catalog, "", None)), ["1", "2", "3"]);
    }

    #[test]
    fn query_matches_name_or_description_case_insensitively() {
        let catalog = Catalog::builtin();
        assert_eq!(ids(&filter_personalities(&catalog, "CURIE", None)), ["3"]);
        assert_eq!(ids(&filter_personalities(&catalog, "playwright", None)), ["2"]);
        assert!(filter_personalities(&catalog, "napoleon", None).is_empty());
    }

    #[test]
    fn category_filter_combines_with_query() {
        let catalog = Catalog::builtin();
        assert_eq!(
            ids(&filter_personalities(&catalog, "", Some(Category::Science))),
            ["1", "3"]
        );
        assert_eq!(
            ids(&filter_personalities(&catalog, "einstein", Some(Category::Science))),
            ["1"]
        );
        assert!(filter_personalities(&catalog, "einstein", Some(Category::Art)).is_empty());
        assert!(filter_personalities(&catalog, "", Some(Category::Politics)).is_empty());
    }

    #[test]
    fn uncategorised_entries_only_show_without_category_filter() {
        let mut catalog = Catalog::new();
        catalog.insert(Personality::new("x", "Hypatia", "Mathematician"), None);
        assert_eq!(filter_personalities(&catalog, "", None).len(), 1);
        assert!(filter_personalities(&catalog, "", Some(Category::Science)).is_empty());
    }

    #[test]
    fn cursor_moves_within_bounds_and_selects() {
        let catalog = Catalog::builtin();
        let mut sb = Sidebar::new();
        sb.move_up();
        assert_eq!(sb.cursor(), 0);
        sb.move_down(&catalog);
        sb.move_down(&catalog);
        sb.move_down(&catalog);
        assert_eq!(sb.cursor(), 2);
        assert_eq!(sb.select_current(&catalog).as_deref(), Some("3"));
        assert_eq!(sb.selected(), Some("3"));
    }

    #[test]
    fn typing_narrows_and_clamps_cursor() {
        let catalog = Catalog::builtin();
        let mut sb = Sidebar::new();
        sb.move_down(&catalog);
        sb.move_down(&catalog);
        for c in "shake".chars() {
            sb.push_char(&catalog, c);
        }
        assert_eq!(sb.query(), "shake");
        assert_eq!(sb.cursor(), 0);
        assert_eq!(sb.select_current(&catalog).as_deref(), Some("2"));

        sb.set_query(&catalog, "zzz");
        assert!(sb.visible(&catalog).is_empty());
        assert!(sb.select_current(&catalog).is_none());
        // selection survives an empty result list
        assert_eq!(sb.selected(), Some("2"));

        sb.pop_char(&catalog);
        sb.set_query(&catalog, "");
        assert_eq!(sb.visible(&catalog).len(), 3);
    }

    #[test]
    fn set_category_clamps_cursor() {
        let catalog = Catalog::builtin();
        let mut sb = Sidebar::new();
        sb.move_down(&catalog);
        sb.move_down(&catalog);
        sb.set_category(&catalog, Some(Category::Art));
        assert_eq!(sb.cursor(), 0);
        assert_eq!(ids(&sb.visible(&catalog)), ["2"]);
        sb.set_category(&catalog, None);
        assert_eq!(sb.visible(&catalog).len(), 3);
    }

    #[test]
    fn select_id_rejects_unknown() {
        let catalog = Catalog::builtin();
        let mut sb = Sidebar::new();
        assert!(!sb.select_id(&catalog, "99"));
        assert!(sb.select_id(&catalog, "2"));
        assert_eq!(sb.cursor(), 1);
        assert_eq!(sb.selected(), Some("2"));
    }
}
