use std::rc::Rc;

pub type ViewId = u64;

pub type Callback = Rc<dyn Fn()>;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum TextStyle {
    Headline,
    Title,
    #[default]
    Body,
}

#[derive(Clone)]
pub enum ViewKind {
    Surface,
    Column,
    Row,
    Card,
    Text {
        text: String,
        style: TextStyle,
    },
    Button {
        text: String,
        enabled: bool,
        on_click: Option<Callback>,
    },
    /// Indeterminate busy indicator.
    ProgressIndicator,
    Divider,
}

impl std::fmt::Debug for ViewKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ViewKind::Surface => write!(f, "Surface"),
            ViewKind::Column => write!(f, "Column"),
            ViewKind::Row => write!(f, "Row"),
            ViewKind::Card => write!(f, "Card"),
            ViewKind::Text { text, style } => f
                .debug_struct("Text")
                .field("text", text)
                .field("style", style)
                .finish(),
            ViewKind::Button { text, enabled, .. } => f
                .debug_struct("Button")
                .field("text", text)
                .field("enabled", enabled)
                .finish_non_exhaustive(),
            ViewKind::ProgressIndicator => write!(f, "ProgressIndicator"),
            ViewKind::Divider => write!(f, "Divider"),
        }
    }
}

#[derive(Clone, Debug)]
pub struct View {
    pub id: ViewId,
    pub kind: ViewKind,
    pub children: Vec<View>,
}

impl View {
    pub fn new(id: ViewId, kind: ViewKind) -> Self {
        Self {
            id,
            kind,
            children: Vec::new(),
        }
    }

    pub fn with_children(mut self, kids: Vec<View>) -> Self {
        self.children = kids;
        self
    }
}

/// Painted output of a frame: one string per terminal line.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Scene {
    pub lines: Vec<String>,
}

impl Scene {
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.lines.iter().any(|l| l.contains(needle))
    }
}
