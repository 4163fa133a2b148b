use serde::Serialize;

/// Minimal component tree returned by the text-producing callbacks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Fragment {
    Div { children: Vec<Fragment> },
    Heading { text: String },
    Paragraph { text: String },
    List { items: Vec<String> },
    Notice { text: String },
}

impl Fragment {
    pub fn div(children: Vec<Fragment>) -> Self {
        Fragment::Div { children }
    }

    pub fn heading(text: impl Into<String>) -> Self {
        Fragment::Heading { text: text.into() }
    }

    pub fn paragraph(text: impl Into<String>) -> Self {
        Fragment::Paragraph { text: text.into() }
    }

    pub fn list<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Fragment::List {
            items: items.into_iter().map(Into::into).collect(),
        }
    }

    pub fn notice(text: impl Into<String>) -> Self {
        Fragment::Notice { text: text.into() }
    }

    pub fn is_notice(&self) -> bool {
        match self {
            Fragment::Notice { .. } => true,
            Fragment::Div { children } => children.iter().any(Fragment::is_notice),
            _ => false,
        }
    }

    /// Flattens the tree into display lines; list items get a bullet.
    pub fn lines(&self) -> Vec<String> {
        let mut out = Vec::new();
        self.push_lines(&mut out);
        out
    }

    fn push_lines(&self, out: &mut Vec<String>) {
        match self {
            Fragment::Div { children } => {
                for child in children {
                    child.push_lines(out);
                }
            }
            Fragment::Heading { text } | Fragment::Paragraph { text } => out.push(text.clone()),
            Fragment::List { items } => out.extend(items.iter().map(|item| format!("• {item}"))),
            Fragment::Notice { text } => out.push(format!("! {text}")),
        }
    }
}
