//! The closed node-type registry.
//!
//! Node types are a fixed declarative table, not polymorphic dispatch: each
//! type tag maps to one static descriptor carrying render hints (icon,
//! colors), the default size, and the connection-point layout. Unknown tags
//! resolve to [`DEFAULT_NODE_TYPE`], so lookup never fails.

use crate::geometry::Size;
use crate::model::{ConnectionPoint, NodeStyle, PointKind};
use smallvec::{SmallVec, smallvec};

/// Default node extent, also the minimum size.
pub const DEFAULT_NODE_SIZE: Size = Size::new(200.0, 120.0);

// ─── Connection-point layouts ────────────────────────────────────────────

/// Where a node type places its input/output anchors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionLayout {
    /// Input on the left edge, output on the right (flow left-to-right).
    LeftRight,
    /// Input on the top edge, output on the bottom (flow top-to-bottom).
    TopBottom,
}

impl ConnectionLayout {
    /// The fractional anchors for this layout.
    pub fn points(&self) -> SmallVec<[ConnectionPoint; 2]> {
        match self {
            Self::LeftRight => smallvec![
                ConnectionPoint::new(PointKind::Input, 0.0, 0.5),
                ConnectionPoint::new(PointKind::Output, 1.0, 0.5),
            ],
            Self::TopBottom => smallvec![
                ConnectionPoint::new(PointKind::Input, 0.5, 0.0),
                ConnectionPoint::new(PointKind::Output, 0.5, 1.0),
            ],
        }
    }
}

// ─── Descriptors ─────────────────────────────────────────────────────────

/// A static node-type descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeType {
    pub tag: &'static str,
    pub label: &'static str,
    pub description: &'static str,
    /// Icon name hint for frontends (lucide-style tag).
    pub icon: &'static str,
    pub category: &'static str,
    pub connection_layout: ConnectionLayout,
    background: &'static str,
    border: &'static str,
    text: &'static str,
}

impl NodeType {
    pub fn default_size(&self) -> Size {
        DEFAULT_NODE_SIZE
    }

    /// The type's default colors as an owned style.
    pub fn style(&self) -> NodeStyle {
        NodeStyle {
            background: self.background.into(),
            border: self.border.into(),
            text: self.text.into(),
        }
    }

    pub const fn with_colors(
        tag: &'static str,
        label: &'static str,
        description: &'static str,
        icon: &'static str,
        category: &'static str,
        layout: ConnectionLayout,
        background: &'static str,
        border: &'static str,
        text: &'static str,
    ) -> Self {
        Self {
            tag,
            label,
            description,
            icon,
            category,
            connection_layout: layout,
            background,
            border,
            text,
        }
    }
}

const fn ty(
    tag: &'static str,
    label: &'static str,
    description: &'static str,
    icon: &'static str,
    category: &'static str,
) -> NodeType {
    NodeType::with_colors(
        tag,
        label,
        description,
        icon,
        category,
        ConnectionLayout::LeftRight,
        "#1a1f35",
        "#2a3147",
        "#ffffff",
    )
}

/// Fallback descriptor for unknown type tags.
pub const DEFAULT_NODE_TYPE: NodeType = ty("node", "Node", "Generic workflow node", "Box", "project");

/// The full type catalog, grouped by category.
pub const NODE_TYPES: &[NodeType] = &[
    // Project management
    NodeType::with_colors(
        "task",
        "Task",
        "A basic task or action item",
        "CheckSquare",
        "project",
        ConnectionLayout::TopBottom,
        "#1a1f35",
        "#2a3147",
        "#ffffff",
    ),
    NodeType::with_colors(
        "milestone",
        "Milestone",
        "A project milestone or checkpoint",
        "Flag",
        "project",
        ConnectionLayout::LeftRight,
        "#1f2937",
        "#374151",
        "#ffffff",
    ),
    ty("approval", "Approval", "Approval or review gate", "UserCheck", "project"),
    // Data flow
    ty("dataSource", "Data Source", "External data source or input", "Database", "data"),
    ty("transform", "Transform", "Data transformation or processing", "RefreshCw", "data"),
    ty("storage", "Storage", "Data storage or output", "HardDrive", "data"),
    // Development
    ty("feature", "Feature", "New feature development", "Code", "development"),
    ty("review", "Code Review", "Code review process", "GitPullRequest", "development"),
    ty("test", "Testing", "Testing and QA", "TestTube", "development"),
    // Business process
    ty("start", "Start", "Process start point", "Play", "process"),
    ty("activity", "Activity", "Business activity or process", "Activity", "process"),
    ty("gateway", "Gateway", "Decision or merge point", "GitBranch", "process"),
    // Marketing
    ty("campaign", "Campaign", "Marketing campaign", "Megaphone", "marketing"),
    ty("content", "Content", "Content creation and management", "FileText", "marketing"),
    ty("analytics", "Analytics", "Marketing analytics and metrics", "BarChart", "marketing"),
    // Manufacturing
    ty("supply", "Supply", "Supply and inventory", "Package", "manufacturing"),
    ty("production", "Production", "Manufacturing process", "Factory", "manufacturing"),
    ty("distribution", "Distribution", "Product distribution", "Truck", "manufacturing"),
    // Customer support
    ty("ticket", "Ticket", "Support ticket", "Ticket", "support"),
    ty("resolution", "Resolution", "Issue resolution", "CheckCircle", "support"),
    ty("feedback", "Feedback", "Customer feedback", "MessageSquare", "support"),
    // HR
    ty("application", "Application", "Job application", "FileText", "hr"),
    ty("interview", "Interview", "Interview process", "Users", "hr"),
    ty("onboarding", "Onboarding", "Employee onboarding", "UserPlus", "hr"),
    // Research
    ty("hypothesis", "Hypothesis", "Research hypothesis", "Lightbulb", "research"),
    ty("experiment", "Experiment", "Research experiment", "Flask", "research"),
    ty("results", "Results", "Research results", "ClipboardCheck", "research"),
    // Training
    ty("lesson", "Lesson", "Training lesson", "BookOpen", "training"),
    ty("assessment", "Assessment", "Knowledge assessment", "ClipboardList", "training"),
    ty("resource", "Resource", "Training resource", "FileText", "training"),
];

/// Look up a descriptor by tag. Unknown tags get the default descriptor.
pub fn descriptor(tag: &str) -> &'static NodeType {
    NODE_TYPES
        .iter()
        .find(|t| t.tag == tag)
        .unwrap_or(&DEFAULT_NODE_TYPE)
}

// ─── Categories ──────────────────────────────────────────────────────────

/// A node-library category (grouping + accent color).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Category {
    pub key: &'static str,
    pub name: &'static str,
    pub color: &'static str,
}

pub const CATEGORIES: &[Category] = &[
    Category { key: "project", name: "Project Management", color: "#3B82F6" },
    Category { key: "data", name: "Data Flow", color: "#10B981" },
    Category { key: "development", name: "Development", color: "#8B5CF6" },
    Category { key: "process", name: "Business Process", color: "#EC4899" },
    Category { key: "marketing", name: "Marketing", color: "#F59E0B" },
    Category { key: "manufacturing", name: "Manufacturing", color: "#EF4444" },
    Category { key: "support", name: "Customer Support", color: "#06B6D4" },
    Category { key: "hr", name: "HR", color: "#14B8A6" },
    Category { key: "research", name: "Research", color: "#6366F1" },
    Category { key: "training", name: "Training", color: "#8B5CF6" },
];

/// Look up a category by key.
pub fn category(key: &str) -> Option<&'static Category> {
    CATEGORIES.iter().find(|c| c.key == key)
}

/// All types belonging to a category, in table order.
pub fn types_in_category(key: &str) -> impl Iterator<Item = &'static NodeType> {
    NODE_TYPES.iter().filter(move |t| t.category == key)
}
