use crate::backend::types::Repository;
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortColumn {
    #[default]
    Created,
    Name,
    Language,
    Forks,
}

impl SortColumn {
    pub fn label(self) -> &'static str {
        match self {
            SortColumn::Created => "created",
            SortColumn::Name => "name",
            SortColumn::Language => "language",
            SortColumn::Forks => "forks",
        }
    }

    pub fn next(self) -> Self {
        match self {
            SortColumn::Created => SortColumn::Name,
            SortColumn::Name => SortColumn::Language,
            SortColumn::Language => SortColumn::Forks,
            SortColumn::Forks => SortColumn::Created,
        }
    }

    fn compare(self, a: &Repository, b: &Repository) -> Ordering {
        match self {
            SortColumn::Created => a.created_at.cmp(&b.created_at),
            SortColumn::Name => a.full_name.to_lowercase().cmp(&b.full_name.to_lowercase()),
            SortColumn::Language => a.language.cmp(&b.language),
            SortColumn::Forks => a.forks_count.cmp(&b.forks_count),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Descending,
    Ascending,
}

impl SortDirection {
    pub fn flip(self) -> Self {
        match self {
            SortDirection::Descending => SortDirection::Ascending,
            SortDirection::Ascending => SortDirection::Descending,
        }
    }

    pub fn arrow(self) -> &'static str {
        match self {
            SortDirection::Descending => "\u{2193}",
            SortDirection::Ascending => "\u{2191}",
        }
    }
}

/// Display-only ordering and filtering over the loaded collection.
#[derive(Debug, Clone, Default)]
pub struct TableView {
    pub sort: SortColumn,
    pub direction: SortDirection,
    pub language: Option<String>,
    pub name_query: String,
}

impl TableView {
    /// Moves the language filter through `options`, with `None` ("all")
    /// between the last option and the first.
    pub fn cycle_language(&mut self, options: &[String], forward: bool) {
        let current = self
            .language
            .as_ref()
            .and_then(|lang| options.iter().position(|o| o == lang));
        let next = match (current, forward) {
            (None, true) => options.first(),
            (None, false) => options.last(),
            (Some(i), true) => options.get(i + 1),
            (Some(0), false) => None,
            (Some(i), false) => options.get(i - 1),
        };
        self.language = next.cloned();
    }

    /// Rows to show, in display order. Sorting is stable, so equal keys keep
    /// the collection's order.
    pub fn visible_rows<'a>(&self, repos: &'a [Repository]) -> Vec<&'a Repository> {
        let query = self.name_query.to_lowercase();
        let mut rows: Vec<&Repository> = repos
            .iter()
            .filter(|r| match &self.language {
                Some(lang) => r.language.as_deref() == Some(lang.as_str()),
                None => true,
            })
            .filter(|r| query.is_empty() || r.full_name.to_lowercase().contains(&query))
            .collect();

        if self.sort != SortColumn::Created || self.direction != SortDirection::Descending {
            rows.sort_by(|a, b| {
                let ord = self.sort.compare(a, b);
                match self.direction {
                    SortDirection::Ascending => ord,
                    SortDirection::Descending => ord.reverse(),
                }
            });
        }
        rows
    }
}
