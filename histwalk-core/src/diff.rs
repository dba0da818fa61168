use similar::{ChangeTag, TextDiff};

/// Line diff of two text files, grouped into unified-diff hunks.
#[derive(Debug, Clone)]
pub struct FileDiff {
    pub hunks: Vec<Hunk>,
}

#[derive(Debug, Clone)]
pub struct Hunk {
    /// `@@ -a,b +c,d @@`
    pub header: String,
    pub lines: Vec<DiffLine>,
}

#[derive(Debug, Clone)]
pub struct DiffLine {
    pub line_type: DiffLineType,
    pub content: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiffLineType {
    Context,
    Addition,
    Deletion,
}

impl DiffLineType {
    pub fn prefix(&self) -> &str {
        match self {
            DiffLineType::Addition => "+",
            DiffLineType::Deletion => "-",
            DiffLineType::Context => " ",
        }
    }
}

impl FileDiff {
    pub fn compute(old_text: &str, new_text: &str, context: usize) -> Self {
        let diff = TextDiff::from_lines(old_text, new_text);
        let hunks = diff
            .unified_diff()
            .context_radius(context)
            .iter_hunks()
            .map(|hunk| Hunk {
                header: hunk.header().to_string(),
                lines: hunk
                    .iter_changes()
                    .map(|change| DiffLine {
                        line_type: match change.tag() {
                            ChangeTag::Delete => DiffLineType::Deletion,
                            ChangeTag::Insert => DiffLineType::Addition,
                            ChangeTag::Equal => DiffLineType::Context,
                        },
                        content: change.value().to_string(),
                    })
                    .collect(),
            })
            .collect();

        FileDiff { hunks }
    }

    pub fn is_empty(&self) -> bool {
        self.hunks.is_empty()
    }

    /// (insertions, deletions)
    pub fn counts(&self) -> (usize, usize) {
        self.hunks
            .iter()
            .flat_map(|hunk| hunk.lines.iter())
            .fold((0, 0), |(ins, del), line| match line.line_type {
                DiffLineType::Addition => (ins + 1, del),
                DiffLineType::Deletion => (ins, del + 1),
                DiffLineType::Context => (ins, del),
            })
    }
}
