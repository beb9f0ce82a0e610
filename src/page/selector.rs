//! Just enough CSS selector matching for the in-memory page.
//!
//! Covers compound selectors of tag, `#id` and `.class` parts joined by
//! descendant combinators, which is every selector the enhancement layer
//! issues. No sibling combinators, no attribute selectors, no pseudo
//! classes.

/// A parsed selector: one compound per whitespace-separated segment,
/// outermost ancestor first.
pub(super) struct Selector {
    pub(super) compounds: Vec<Compound>,
}

/// One `tag#id.class` segment.
#[derive(Default)]
pub(super) struct Compound {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
}

enum Part {
    Tag,
    Id,
    Class,
}

impl Selector {
    pub(super) fn parse(input: &str) -> Self {
        Self {
            compounds: input.split_whitespace().map(Compound::parse).collect(),
        }
    }
}

impl Compound {
    fn parse(segment: &str) -> Self {
        let mut compound = Self::default();
        let mut kind = Part::Tag;
        let mut token = String::new();
        for ch in segment.chars() {
            match ch {
                '#' | '.' => {
                    compound.push(&kind, token);
                    token = String::new();
                    kind = if ch == '#' { Part::Id } else { Part::Class };
                }
                _ => token.push(ch),
            }
        }
        compound.push(&kind, token);
        compound
    }

    fn push(&mut self, kind: &Part, token: String) {
        if token.is_empty() {
            return;
        }
        match kind {
            Part::Tag => self.tag = Some(token),
            Part::Id => self.id = Some(token),
            Part::Class => self.classes.push(token),
        }
    }

    /// Whether an element with the given tag, id and `class` attribute
    /// satisfies this compound.
    pub(super) fn matches(&self, tag: &str, id: Option<&str>, class_attr: &str) -> bool {
        if let Some(want) = &self.tag
            && want != tag
        {
            return false;
        }
        if let Some(want) = &self.id
            && id != Some(want.as_str())
        {
            return false;
        }
        self.classes
            .iter()
            .all(|class| class_attr.split_whitespace().any(|have| have == class))
    }
}
