//! Template table for synthetic SQL text and error messages
//!
//! Every template is identified by an enum variant that declares the
//! placeholders it needs. The table is compiled once; compilation fails if a
//! template's `{token}`s do not match its declaration exactly.

use crate::{Error, Result};
use regex::Regex;
use std::collections::BTreeSet;
use std::sync::LazyLock;

static TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{([A-Za-z_][A-Za-z0-9_]*)\}").expect("token pattern is valid")
});

/// A value slot inside a template
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Placeholder {
    /// Calendar date, `YYYY-MM-DD`
    Date,
    /// Whole-number price
    Price,
    /// Row identifier
    RecordId,
    /// Two-letter US state code
    Region,
    /// SQL Server session (SPID)
    ProcessId,
}

impl Placeholder {
    pub const ALL: [Self; 5] = [
        Self::Date,
        Self::Price,
        Self::RecordId,
        Self::Region,
        Self::ProcessId,
    ];

    /// Name used between braces in template text
    pub fn token_name(self) -> &'static str {
        match self {
            Self::Date => "date",
            Self::Price => "price",
            Self::RecordId => "id",
            Self::Region => "region",
            Self::ProcessId => "pid",
        }
    }

    pub fn from_token_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.token_name() == name)
    }

    /// Pattern a substituted value matches
    fn value_pattern(self) -> &'static str {
        match self {
            Self::Date => r"\d{4}-\d{2}-\d{2}",
            Self::Price | Self::RecordId | Self::ProcessId => r"\d+",
            Self::Region => r"[A-Z]{2}",
        }
    }
}

/// Slow-query SQL statements
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SqlTemplate {
    OrdersSince,
    ExpensiveProductCount,
    SalaryRaise,
    PurgeAuditLogs,
    TopCustomersByRegion,
}

impl SqlTemplate {
    pub const ALL: [Self; 5] = [
        Self::OrdersSince,
        Self::ExpensiveProductCount,
        Self::SalaryRaise,
        Self::PurgeAuditLogs,
        Self::TopCustomersByRegion,
    ];

    pub fn format_string(self) -> &'static str {
        match self {
            Self::OrdersSince => "SELECT * FROM Sales.Orders WHERE OrderDate > '{date}'",
            Self::ExpensiveProductCount => {
                "SELECT COUNT(*) FROM Production.Products WHERE Cost > {price}"
            }
            Self::SalaryRaise => {
                "UPDATE HumanResources.Employees SET Salary = Salary * 1.1 WHERE ID = {id}"
            }
            Self::PurgeAuditLogs => "DELETE FROM Audit.Logs WHERE LogDate < '{date}'",
            Self::TopCustomersByRegion => {
                "SELECT TOP 10 * FROM Customers c JOIN Orders o ON c.ID = o.CustomerID WHERE c.Region = '{region}'"
            }
        }
    }

    pub fn placeholders(self) -> &'static [Placeholder] {
        match self {
            Self::OrdersSince | Self::PurgeAuditLogs => &[Placeholder::Date],
            Self::ExpensiveProductCount => &[Placeholder::Price],
            Self::SalaryRaise => &[Placeholder::RecordId],
            Self::TopCustomersByRegion => &[Placeholder::Region],
        }
    }
}

/// SQL Server error log messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorTemplate {
    LoginFailed,
    DeadlockVictim,
    TransactionLogFull,
    TimeoutExpired,
}

impl ErrorTemplate {
    pub const ALL: [Self; 4] = [
        Self::LoginFailed,
        Self::DeadlockVictim,
        Self::TransactionLogFull,
        Self::TimeoutExpired,
    ];

    pub fn format_string(self) -> &'static str {
        match self {
            Self::LoginFailed => {
                "Login failed for user 'sa'. Reason: Password did not match that for the login provided."
            }
            Self::DeadlockVictim => {
                "Transaction (Process ID {pid}) was deadlocked on lock resources with another process and has been chosen as the deadlock victim."
            }
            Self::TransactionLogFull => {
                "The transaction log for database 'SalesDB' is full due to 'LOG_BACKUP'."
            }
            Self::TimeoutExpired => {
                "Timeout expired. The timeout period elapsed prior to completion of the operation."
            }
        }
    }

    pub fn placeholders(self) -> &'static [Placeholder] {
        match self {
            Self::DeadlockVictim => &[Placeholder::ProcessId],
            Self::LoginFailed | Self::TransactionLogFull | Self::TimeoutExpired => &[],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemplateId {
    Sql(SqlTemplate),
    Error(ErrorTemplate),
}

impl TemplateId {
    pub fn format_string(self) -> &'static str {
        match self {
            Self::Sql(t) => t.format_string(),
            Self::Error(t) => t.format_string(),
        }
    }

    pub fn placeholders(self) -> &'static [Placeholder] {
        match self {
            Self::Sql(t) => t.placeholders(),
            Self::Error(t) => t.placeholders(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Slot(Placeholder),
}

/// A template split into literal text and placeholder slots
#[derive(Debug, Clone)]
pub struct CompiledTemplate {
    id: TemplateId,
    segments: Vec<Segment>,
    placeholders: BTreeSet<Placeholder>,
    shape: Regex,
}

impl CompiledTemplate {
    /// Parse `text` and check its tokens against `declared`
    pub fn compile(id: TemplateId, text: &str, declared: &[Placeholder]) -> Result<Self> {
        let mut segments = Vec::new();
        let mut found = BTreeSet::new();
        let mut cursor = 0;

        for captures in TOKEN.captures_iter(text) {
            let (Some(whole), Some(name)) = (captures.get(0), captures.get(1)) else {
                continue;
            };
            let placeholder = Placeholder::from_token_name(name.as_str()).ok_or_else(|| {
                Error::template(id, format!("unknown placeholder {}", whole.as_str()))
            })?;
            push_literal(id, &mut segments, &text[cursor..whole.start()])?;
            segments.push(Segment::Slot(placeholder));
            found.insert(placeholder);
            cursor = whole.end();
        }
        push_literal(id, &mut segments, &text[cursor..])?;

        let declared: BTreeSet<Placeholder> = declared.iter().copied().collect();
        if let Some(missing) = declared.difference(&found).next() {
            return Err(Error::template(
                id,
                format!("declared placeholder {{{}}} never appears", missing.token_name()),
            ));
        }
        if let Some(undeclared) = found.difference(&declared).next() {
            return Err(Error::template(
                id,
                format!("placeholder {{{}}} is not declared", undeclared.token_name()),
            ));
        }

        let shape = shape_regex(id, &segments)?;
        Ok(Self {
            id,
            segments,
            placeholders: found,
            shape,
        })
    }

    pub fn id(&self) -> TemplateId {
        self.id
    }

    pub fn placeholders(&self) -> impl Iterator<Item = Placeholder> + '_ {
        self.placeholders.iter().copied()
    }

    /// Fill every slot with the value `fill` returns for its placeholder
    pub fn render<F>(&self, mut fill: F) -> String
    where
        F: FnMut(Placeholder) -> String,
    {
        let mut rendered = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => rendered.push_str(text),
                Segment::Slot(placeholder) => rendered.push_str(&fill(*placeholder)),
            }
        }
        rendered
    }

    /// True when `text` could have been rendered from this template
    pub fn matches(&self, text: &str) -> bool {
        self.shape.is_match(text)
    }
}

fn push_literal(id: TemplateId, segments: &mut Vec<Segment>, text: &str) -> Result<()> {
    if text.contains(['{', '}']) {
        return Err(Error::template(id, format!("unbalanced brace in {text:?}")));
    }
    if !text.is_empty() {
        segments.push(Segment::Literal(text.to_string()));
    }
    Ok(())
}

fn shape_regex(id: TemplateId, segments: &[Segment]) -> Result<Regex> {
    let mut pattern = String::from("^");
    for segment in segments {
        match segment {
            Segment::Literal(text) => pattern.push_str(&regex::escape(text)),
            Segment::Slot(placeholder) => {
                pattern.push('(');
                pattern.push_str(placeholder.value_pattern());
                pattern.push(')');
            }
        }
    }
    pattern.push('$');
    Regex::new(&pattern).map_err(|e| Error::template(id, e.to_string()))
}

/// Compiled SQL and error templates
#[derive(Debug, Clone)]
pub struct TemplateTable {
    sql: Vec<CompiledTemplate>,
    errors: Vec<CompiledTemplate>,
}

impl TemplateTable {
    /// Compile the built-in templates
    pub fn new() -> Result<Self> {
        let compile = |id: TemplateId| {
            CompiledTemplate::compile(id, id.format_string(), id.placeholders())
        };
        let sql = SqlTemplate::ALL
            .into_iter()
            .map(|t| compile(TemplateId::Sql(t)))
            .collect::<Result<Vec<_>>>()?;
        let errors = ErrorTemplate::ALL
            .into_iter()
            .map(|t| compile(TemplateId::Error(t)))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { sql, errors })
    }

    pub fn sql_templates(&self) -> &[CompiledTemplate] {
        &self.sql
    }

    pub fn error_templates(&self) -> &[CompiledTemplate] {
        &self.errors
    }

    /// Which template, if any, produced `text`
    pub fn identify(&self, text: &str) -> Option<TemplateId> {
        self.sql
            .iter()
            .chain(&self.errors)
            .find(|t| t.matches(text))
            .map(CompiledTemplate::id)
    }
}
