use chrono::NaiveDate;

/// Due-date restriction, evaluated relative to "now" when the query runs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DueFilter {
    /// Due within [start of today, start of tomorrow)
    Today,
    /// Due within [start of tomorrow, start of the day after)
    Tomorrow,
    /// Due within [start of today, start of today + 7 days)
    NextWeek,
    /// Due before the start of today and not completed
    Overdue,
    /// Due on this calendar day (local time)
    On(NaiveDate),
}

/// Field to order listings by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    #[default]
    Created,
    Updated,
    Due,
    Priority,
    Title,
}

impl SortKey {
    pub const ALL: [SortKey; 5] = [
        SortKey::Created,
        SortKey::Updated,
        SortKey::Due,
        SortKey::Priority,
        SortKey::Title,
    ];

    /// Next key in display order, wrapping around
    pub fn cycle(self) -> SortKey {
        let idx = Self::ALL.iter().position(|k| *k == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    pub fn name(self) -> &'static str {
        match self {
            SortKey::Created => "created",
            SortKey::Updated => "updated",
            SortKey::Due => "due",
            SortKey::Priority => "priority",
            SortKey::Title => "title",
        }
    }

    /// Parse a key name or its one-letter alias
    pub fn parse(s: &str) -> Option<SortKey> {
        match s.to_lowercase().as_str() {
            "created" | "c" => Some(SortKey::Created),
            "updated" | "u" => Some(SortKey::Updated),
            "due" | "d" => Some(SortKey::Due),
            "priority" | "p" => Some(SortKey::Priority),
            "title" | "t" => Some(SortKey::Title),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub fn flip(self) -> SortOrder {
        match self {
            SortOrder::Asc => SortOrder::Desc,
            SortOrder::Desc => SortOrder::Asc,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }

    pub fn parse(s: &str) -> Option<SortOrder> {
        match s.to_lowercase().as_str() {
            "asc" | "a" => Some(SortOrder::Asc),
            "desc" | "d" => Some(SortOrder::Desc),
            _ => None,
        }
    }
}

/// Filter and sort criteria for listing tasks.
///
/// `Default` applies no filters and sorts by creation time, newest first.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Query {
    /// `None` matches both open and completed tasks
    pub completed: Option<bool>,
    /// Every tag listed must be present on the task
    pub tags: Vec<String>,
    /// Case-insensitive substring of title or description
    pub search: Option<String>,
    pub due: Option<DueFilter>,
    pub sort: SortKey,
    pub order: SortOrder,
}

impl Query {
    /// Open tasks only
    pub fn pending() -> Self {
        Query {
            completed: Some(false),
            ..Default::default()
        }
    }

    /// No filters at all
    pub fn all() -> Self {
        Query::default()
    }

    pub fn with_search(mut self, text: &str) -> Self {
        self.search = if text.trim().is_empty() {
            None
        } else {
            Some(text.to_string())
        };
        self
    }

    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }

    pub fn with_due(mut self, due: DueFilter) -> Self {
        self.due = Some(due);
        self
    }

    pub fn sorted_by(mut self, sort: SortKey, order: SortOrder) -> Self {
        self.sort = sort;
        self.order = order;
        self
    }
}
