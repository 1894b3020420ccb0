use std::collections::BTreeMap;

/// Headcount for one company, as reported by the profile endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmployeeRecord {
    pub symbol: String,
    pub company_name: Option<String>,
    pub full_time_employees: u64,
}

/// Employee records keyed by the symbol each record reports for itself.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmployeeCounts {
    by_symbol: BTreeMap<String, EmployeeRecord>,
}

impl EmployeeCounts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a record under its own symbol. The first record seen for a symbol wins;
    /// returns `false` when the record was a duplicate and got dropped.
    pub fn insert(&mut self, record: EmployeeRecord) -> bool {
        if self.by_symbol.contains_key(&record.symbol) {
            return false;
        }
        self.by_symbol.insert(record.symbol.clone(), record);
        true
    }

    pub fn get(&self, symbol: &str) -> Option<&EmployeeRecord> {
        self.by_symbol.get(symbol)
    }

    pub fn len(&self) -> usize {
        self.by_symbol.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_symbol.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &EmployeeRecord> {
        self.by_symbol.values()
    }
}

impl FromIterator<EmployeeRecord> for EmployeeCounts {
    fn from_iter<I: IntoIterator<Item = EmployeeRecord>>(iter: I) -> Self {
        let mut counts = Self::new();
        for r in iter {
            counts.insert(r);
        }
        counts
    }
}
