use std::fmt;

use crate::{screener::Candidate, sentiment::SentimentSummary};

/// One company in the final table.
#[derive(Debug, Clone, PartialEq)]
pub struct CompanyRow {
    pub symbol: String,
    pub company_name: String,
    pub market_cap: f64,
    pub beta: Option<f64>,
    pub full_time_employees: Option<u64>,
    pub sentiment: Option<SentimentSummary>,
}

impl From<&Candidate> for CompanyRow {
    fn from(c: &Candidate) -> Self {
        Self {
            symbol: c.symbol.clone(),
            company_name: c.company_name.clone(),
            market_cap: c.market_cap,
            beta: c.beta,
            full_time_employees: None,
            sentiment: None,
        }
    }
}

impl CompanyRow {
    /// The keys this row actually carries, in canonical column order.
    /// Absent enrichment yields absent keys, never zero values.
    pub fn fields(&self) -> Vec<(Column, FieldValue<'_>)> {
        let mut out = vec![
            (Column::Symbol, FieldValue::Text(&self.symbol)),
            (Column::CompanyName, FieldValue::Text(&self.company_name)),
            (Column::MarketCap, FieldValue::Float(self.market_cap)),
        ];
        if let Some(b) = self.beta {
            out.push((Column::Beta, FieldValue::Float(b)));
        }
        if let Some(n) = self.full_time_employees {
            out.push((Column::FullTimeEmployees, FieldValue::Int(n)));
        }
        if let Some(s) = &self.sentiment {
            out.push((Column::PositiveMentions, FieldValue::Int(s.positive_mentions)));
            out.push((Column::NegativeMentions, FieldValue::Int(s.negative_mentions)));
            out.push((Column::MeanSentimentScore, FieldValue::Float(s.mean_sentiment_score)));
        }
        out
    }

    pub fn get(&self, column: Column) -> Option<FieldValue<'_>> {
        self.fields()
            .into_iter()
            .find_map(|(c, v)| (c == column).then_some(v))
    }
}

/// Columns of the final table, declared in output order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Column {
    Symbol,
    CompanyName,
    MarketCap,
    Beta,
    FullTimeEmployees,
    PositiveMentions,
    NegativeMentions,
    MeanSentimentScore,
}

impl Column {
    pub const ALL: [Column; 8] = [
        Column::Symbol,
        Column::CompanyName,
        Column::MarketCap,
        Column::Beta,
        Column::FullTimeEmployees,
        Column::PositiveMentions,
        Column::NegativeMentions,
        Column::MeanSentimentScore,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Column::Symbol => "symbol",
            Column::CompanyName => "companyName",
            Column::MarketCap => "marketCap",
            Column::Beta => "beta",
            Column::FullTimeEmployees => "fullTimeEmployees",
            Column::PositiveMentions => "positiveMentions",
            Column::NegativeMentions => "negativeMentions",
            Column::MeanSentimentScore => "meanSentimentScore",
        }
    }

    /// Columns present in at least one row, in canonical order.
    pub fn union_of(rows: &[CompanyRow]) -> Vec<Column> {
        let mut present = [false; Column::ALL.len()];
        for row in rows {
            for (c, _) in row.fields() {
                present[c as usize] = true;
            }
        }
        Column::ALL
            .into_iter()
            .filter(|c| present[*c as usize])
            .collect()
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A borrowed cell value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue<'a> {
    Text(&'a str),
    Int(u64),
    Float(f64),
}

impl fmt::Display for FieldValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(s) => f.write_str(s),
            FieldValue::Int(n) => write!(f, "{n}"),
            FieldValue::Float(x) => write!(f, "{x}"),
        }
    }
}
