//! LIMIT/OFFSET rendering
//!
//! Zero means "not set" for both bounds, so `Pagination::new(0, 0)` renders
//! nothing and returns every row.

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Pagination {
    pub limit: u64,
    pub offset: u64,
}

impl Pagination {
    pub fn new(limit: u64, offset: u64) -> Self {
        Self { limit, offset }
    }

    pub fn with_limit(mut self, limit: u64) -> Self {
        self.limit = limit;
        self
    }

    pub fn with_offset(mut self, offset: u64) -> Self {
        self.offset = offset;
        self
    }

    pub fn is_unbounded(&self) -> bool {
        self.limit == 0 && self.offset == 0
    }

    /// SQL suffix, including a leading space when non-empty.
    ///
    /// SQLite only accepts OFFSET after a LIMIT, so an offset without a limit
    /// renders `LIMIT -1`. Bounds above `i64::MAX` are clamped to it, the
    /// largest value the engine accepts.
    pub fn to_sql(&self) -> String {
        match (clamp(self.limit), clamp(self.offset)) {
            (0, 0) => String::new(),
            (limit, 0) => format!(" LIMIT {}", limit),
            (0, offset) => format!(" LIMIT -1 OFFSET {}", offset),
            (limit, offset) => format!(" LIMIT {} OFFSET {}", limit, offset),
        }
    }
}

fn clamp(bound: u64) -> i64 {
    i64::try_from(bound).unwrap_or(i64::MAX)
}
