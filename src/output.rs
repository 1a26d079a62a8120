//! Output formatting for human and JSON modes
//!
//! This module provides structured output that can be rendered either as
//! human-readable text or machine-parseable JSON. Every command prints one
//! [`Report`]: its result plus the notifications the session raised.

use colored::{ColoredString, Colorize};
use serde::Serialize;

use crate::core::models::{
    AnalysisResult, ChecklistItem, EntityId, Notification, NotificationKind, ParentType, Party,
    PartyKind, PartyRole, RiskLevel, Status,
};
use crate::core::services::{AuditSummary, CategoryGroup, PropertyProgress};

/// Output mode for the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output (machine-readable)
    Json,
}

/// Results that know how to print themselves for a person
pub trait HumanOutput {
    /// Print to stdout
    fn render_human(&self);
}

/// A command result together with the session's notifications
#[derive(Debug, Serialize)]
pub struct Report<'a, T> {
    /// What the command produced
    #[serde(flatten)]
    pub result: &'a T,
    /// Session notifications, most recent first
    pub notifications: &'a [Notification],
}

impl<'a, T: Serialize + HumanOutput> Report<'a, T> {
    /// Pair a result with notifications
    #[must_use]
    pub const fn new(result: &'a T, notifications: &'a [Notification]) -> Self {
        Self {
            result,
            notifications,
        }
    }

    /// Render the report based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => self.render_human(),
            OutputMode::Json => self.render_json(),
        }
    }

    fn render_human(&self) {
        self.result.render_human();
        if self.notifications.is_empty() {
            return;
        }
        println!();
        for n in self.notifications.iter().rev() {
            println!("{} {}", kind_badge(n.kind), n.message);
        }
    }

    fn render_json(&self) {
        println!("{}", serde_json::to_string_pretty(self).unwrap_or_default());
    }
}

// =============================================================================
// RESULTS
// =============================================================================

/// Generic operation result for simple commands
#[derive(Debug, Serialize)]
pub struct OperationResult {
    /// Whether the operation succeeded
    pub success: bool,
    /// Human-readable message
    pub message: String,
    /// Entity the operation touched
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<EntityId>,
    /// Whether the entity only exists in this session
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub local: bool,
}

impl OperationResult {
    /// Successful operation
    #[must_use]
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            id: None,
            local: false,
        }
    }

    /// Failed operation
    #[must_use]
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            id: None,
            local: false,
        }
    }

    /// Attach the touched entity
    #[must_use]
    pub fn with_id(mut self, id: EntityId, local: bool) -> Self {
        self.id = Some(id);
        self.local = local;
        self
    }
}

impl HumanOutput for OperationResult {
    fn render_human(&self) {
        let mark = if self.success { "✓".green() } else { "✗".red() };
        match &self.id {
            Some(id) if self.local => println!("{mark} {} [{id}] (local only)", self.message),
            Some(id) => println!("{mark} {} [{id}]", self.message),
            None => println!("{mark} {}", self.message),
        }
    }
}

/// Overall audit status
#[derive(Debug, Serialize)]
pub struct StatusReport {
    /// Whether the session runs without a remote store
    pub offline: bool,
    /// Aggregates
    pub summary: AuditSummary,
    /// Selected property
    pub active_property: Option<EntityId>,
    /// Free-form notes for the whole audit
    pub general_notes: String,
}

impl HumanOutput for StatusReport {
    fn render_human(&self) {
        if self.offline {
            println!("{}", "Offline: changes are not saved".yellow());
            println!();
        }

        let s = &self.summary;
        println!("Progress: {}% ({} items)", s.progress, s.total_items);
        println!("  • {} pending", s.pending);
        println!("  • {} need attention", s.attention);
        println!();

        println!("Properties:");
        for p in &s.properties {
            print_property_line(p, self.active_property.as_ref());
        }
        println!();
        println!(
            "Parties: {} pending, {} need attention",
            s.party_pending, s.party_attention
        );

        if !self.general_notes.trim().is_empty() {
            println!();
            println!("Notes: {}", self.general_notes);
        }
    }
}

/// Properties with their progress
#[derive(Debug, Serialize)]
pub struct PropertyListResult {
    /// Selected property
    pub active: Option<EntityId>,
    /// One line per property
    pub properties: Vec<PropertyProgress>,
}

impl HumanOutput for PropertyListResult {
    fn render_human(&self) {
        if self.properties.is_empty() {
            println!("No properties.");
            return;
        }
        for p in &self.properties {
            print_property_line(p, self.active.as_ref());
        }
    }
}

fn print_property_line(p: &PropertyProgress, active: Option<&EntityId>) {
    let marker = if active == Some(&p.id) { "*" } else { " " };
    println!("{marker} [{}] {} ({}/{} regular)", p.id, p.name, p.regular, p.total);
}

/// Parties matching a search
#[derive(Debug, Serialize)]
pub struct PartyListResult {
    /// Matching parties
    pub parties: Vec<PartyLine>,
}

/// A party without its checklist
#[derive(Debug, Serialize)]
pub struct PartyLine {
    /// Party id
    pub id: EntityId,
    /// Name or corporate name
    pub name: String,
    /// CPF or CNPJ
    pub doc: String,
    /// PF or PJ
    #[serde(rename = "type")]
    pub kind: PartyKind,
    /// Buyer or seller
    pub role: PartyRole,
    /// Items still pending
    pub pending: usize,
}

impl From<&Party> for PartyLine {
    fn from(party: &Party) -> Self {
        Self {
            id: party.id.clone(),
            name: party.name.clone(),
            doc: party.doc.clone(),
            kind: party.kind,
            role: party.role,
            pending: party.items.iter().filter(|i| i.status == Status::Pending).count(),
        }
    }
}

impl HumanOutput for PartyListResult {
    fn render_human(&self) {
        if self.parties.is_empty() {
            println!("No parties.");
            return;
        }
        for p in &self.parties {
            let doc = if p.doc.is_empty() { "-" } else { p.doc.as_str() };
            println!(
                "  [{}] {} ({} {}, {doc}) - {} pending",
                p.id, p.name, p.kind, p.role, p.pending
            );
        }
    }
}

/// A property's or party's checklist, grouped by category
#[derive(Debug, Serialize)]
pub struct ChecklistView {
    /// Owner id
    pub id: EntityId,
    /// Owner name
    pub name: String,
    /// Property or party
    pub owner: ParentType,
    /// Categories in first-seen order
    pub categories: Vec<CategoryView>,
}

/// One category of a checklist
#[derive(Debug, Serialize)]
pub struct CategoryView {
    /// Category label
    pub category: String,
    /// Share of resolved items, 0-100
    pub progress: u8,
    /// Items `issue` or `expired`
    pub attention: usize,
    /// Items in insertion order
    pub items: Vec<ChecklistItem>,
}

impl From<CategoryGroup<'_>> for CategoryView {
    fn from(group: CategoryGroup<'_>) -> Self {
        Self {
            category: group.category.to_string(),
            progress: group.progress,
            attention: group.attention,
            items: group.items.into_iter().cloned().collect(),
        }
    }
}

impl HumanOutput for ChecklistView {
    fn render_human(&self) {
        println!("{}: {} [{}]", self.owner.label(), self.name.bold(), self.id);
        for group in &self.categories {
            println!();
            println!("{} ({}%)", group.category.bold(), group.progress);
            for item in &group.items {
                println!("  {:<16} {} [{}]", status_badge(item.status), item.name, item.id);
                if !item.notes.trim().is_empty() {
                    println!("  {:<16} {}", "", item.notes.dimmed());
                }
            }
        }
    }
}

/// Risk verdict
#[derive(Debug, Serialize)]
pub struct AnalysisReport {
    /// The verdict
    #[serde(flatten)]
    pub result: AnalysisResult,
    /// Whether the fallback verdict was used
    pub degraded: bool,
}

impl HumanOutput for AnalysisReport {
    fn render_human(&self) {
        let level = match self.result.risk_level {
            RiskLevel::Baixo => self.result.risk_level.as_str().green(),
            RiskLevel::Medio => self.result.risk_level.as_str().yellow(),
            RiskLevel::Alto => self.result.risk_level.as_str().red(),
        };
        println!("Risco: {}", level.bold());
        println!();
        println!("{}", self.result.summary);
        if !self.result.recommendations.is_empty() {
            println!();
            println!("Recomendações:");
            for r in &self.result.recommendations {
                println!("  • {r}");
            }
        }
    }
}

/// General notes
#[derive(Debug, Serialize)]
pub struct NotesResult {
    /// Current notes
    pub general_notes: String,
}

impl HumanOutput for NotesResult {
    fn render_human(&self) {
        if self.general_notes.trim().is_empty() {
            println!("(no notes)");
        } else {
            println!("{}", self.general_notes);
        }
    }
}

// =============================================================================
// BADGES
// =============================================================================

/// Colored Portuguese status label
#[must_use]
pub fn status_badge(status: Status) -> ColoredString {
    let label = status.label();
    match status {
        Status::Pending => label.yellow(),
        Status::Waiting => label.blue(),
        Status::Ok => label.green(),
        Status::Issue => label.red().bold(),
        Status::Expired => label.magenta(),
        Status::Waived => label.dimmed(),
    }
}

fn kind_badge(kind: NotificationKind) -> ColoredString {
    match kind {
        NotificationKind::Alert => "[alert]".red().bold(),
        NotificationKind::Warning => "[warning]".yellow(),
        NotificationKind::Info => "[info]".cyan(),
    }
}
