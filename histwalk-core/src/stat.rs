//! Structured view of `git show --stat` output, so the console can style
//! names, counts and totals separately.

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatLine {
    /// ` path | 12 +++---`
    File {
        name: String,
        changes: String,
        graph: String,
    },
    /// ` image.png | Bin 0 -> 1234 bytes`
    Binary { name: String, detail: String },
    /// ` 2 files changed, 7 insertions(+), 5 deletions(-)`
    Summary {
        files: usize,
        insertions: usize,
        deletions: usize,
    },
    Other(String),
}

pub fn parse_stat(text: &str) -> Vec<StatLine> {
    text.lines()
        .filter(|line| !line.trim().is_empty())
        .map(parse_line)
        .collect()
}

fn parse_line(line: &str) -> StatLine {
    if let Some((name, rest)) = line.rsplit_once(" | ") {
        let name = name.trim().to_string();
        let rest = rest.trim();

        if let Some(detail) = rest.strip_prefix("Bin") {
            return StatLine::Binary {
                name,
                detail: detail.trim().to_string(),
            };
        }

        let (changes, graph) = rest.split_once(' ').unwrap_or((rest, ""));
        return StatLine::File {
            name,
            changes: changes.to_string(),
            graph: graph.trim().to_string(),
        };
    }

    parse_summary(line).unwrap_or_else(|| StatLine::Other(line.trim().to_string()))
}

fn parse_summary(line: &str) -> Option<StatLine> {
    let mut files = None;
    let mut insertions = 0;
    let mut deletions = 0;

    for part in line.split(',') {
        let (count, label) = part.trim().split_once(' ')?;
        let count: usize = count.parse().ok()?;
        if label.starts_with("file") {
            files = Some(count);
        } else if label.starts_with("insertion") {
            insertions = count;
        } else if label.starts_with("deletion") {
            deletions = count;
        } else {
            return None;
        }
    }

    Some(StatLine::Summary {
        files: files?,
        insertions,
        deletions,
    })
}
