use crate::component_history::domain::{ComponentRecord, RevisionRef, NOT_AVAILABLE};

/// Label carrying the image version
const IMAGE_VERSION_LABEL: &str = "org.opencontainers.image.version=";

/// Label carrying the image reference name
const IMAGE_REF_NAME_LABEL: &str = "org.opencontainers.image.ref.name=";

/// Opening marker of the component block
const COMPONENTS_MARKER: &str = "COMPONENTS=(";

/// ScriptParser - turns one Dockerfile revision into a component record
///
/// A revision yields a record only when it declares a component block:
///
/// ```text
/// COMPONENTS=( \
///   "php-8.1.2-0-linux-${OS_ARCH}-debian-12" \
///   "apache-2.4.54-0-linux-${OS_ARCH}-debian-12" \
/// ) ; \
/// ```
///
/// Each entry becomes a column keyed by the lowercased text before its
/// first `-`. The architecture placeholder is replaced before anything
/// else, so every revision is read under the same architecture.
#[derive(Debug, Clone)]
pub struct ScriptParser {
    arch_placeholder: String,
    arch: String,
}

impl ScriptParser {
    pub const DEFAULT_ARCH_PLACEHOLDER: &'static str = "${OS_ARCH}";
    pub const DEFAULT_ARCH: &'static str = "amd64";

    pub fn new(arch_placeholder: impl Into<String>, arch: impl Into<String>) -> Self {
        Self {
            arch_placeholder: arch_placeholder.into(),
            arch: arch.into(),
        }
    }

    /// Replaces every architecture placeholder with the canonical architecture
    pub fn normalize(&self, text: &str) -> String {
        if self.arch_placeholder.is_empty() {
            return text.to_string();
        }
        text.replace(&self.arch_placeholder, &self.arch)
    }

    /// Parses one revision's text
    ///
    /// # Returns
    /// `None` when the text has no (closed) component block
    pub fn parse(&self, text: &str, revision: &RevisionRef) -> Option<ComponentRecord> {
        let normalized = self.normalize(text);

        let entries = extract_component_block(&normalized)?;

        let image_version = extract_label(&normalized, IMAGE_VERSION_LABEL).unwrap_or(NOT_AVAILABLE);
        let image_ref_name =
            extract_label(&normalized, IMAGE_REF_NAME_LABEL).unwrap_or(NOT_AVAILABLE);

        let mut record = ComponentRecord::new(
            image_version.to_string(),
            image_ref_name.to_string(),
            revision.clone(),
        );
        for spec in entries {
            record.insert_component(component_key(&spec), spec);
        }
        Some(record)
    }
}

impl Default for ScriptParser {
    fn default() -> Self {
        Self::new(Self::DEFAULT_ARCH_PLACEHOLDER, Self::DEFAULT_ARCH)
    }
}

/// Token following the first occurrence of `marker`, up to the next whitespace
fn extract_label<'a>(text: &'a str, marker: &str) -> Option<&'a str> {
    let start = text.find(marker)? + marker.len();
    let rest = &text[start..];
    let end = rest.find(char::is_whitespace).unwrap_or(rest.len());
    Some(&rest[..end])
}

enum BlockState {
    Searching,
    Collecting { depth: usize },
}

/// Collects the entries between the opening marker line and the line that
/// closes its parenthesis. The opening and closing lines themselves are
/// not entries.
fn extract_component_block(text: &str) -> Option<Vec<String>> {
    let mut state = BlockState::Searching;
    let mut entries = Vec::new();

    for line in text.lines() {
        state = match state {
            BlockState::Searching => match line.find(COMPONENTS_MARKER) {
                Some(pos) => {
                    let rest = &line[pos + COMPONENTS_MARKER.len()..];
                    match advance_depth(1, rest) {
                        0 => return Some(entries),
                        depth => BlockState::Collecting { depth },
                    }
                }
                None => BlockState::Searching,
            },
            BlockState::Collecting { depth } => match advance_depth(depth, line) {
                0 => return Some(entries),
                depth => {
                    if let Some(entry) = clean_component_line(line) {
                        entries.push(entry);
                    }
                    BlockState::Collecting { depth }
                }
            },
        };
    }

    // Unclosed block
    None
}

/// Parenthesis depth after scanning `line`; stops at zero
fn advance_depth(mut depth: usize, line: &str) -> usize {
    for c in line.chars() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    return 0;
                }
            }
            _ => {}
        }
    }
    depth
}

/// `  "php-8.1.2-0" \` -> `php-8.1.2-0`
fn clean_component_line(line: &str) -> Option<String> {
    let trimmed = line.trim();
    let without_continuation = trimmed.strip_suffix('\\').unwrap_or(trimmed).trim_end();
    let spec = without_continuation.replace('"', "");
    let spec = spec.trim();
    if spec.is_empty() {
        None
    } else {
        Some(spec.to_string())
    }
}

fn component_key(spec: &str) -> String {
    spec.split_once('-')
        .map(|(name, _)| name)
        .unwrap_or(spec)
        .to_lowercase()
}
