use regex::Regex;

/// One cataloged game entry
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    /// Display name, also the join key against the favorites ledger
    pub name: String,
    /// Category tags, in catalog-file order
    pub categories: Vec<String>,
    /// Where the game came from (emulator, platform, collection)
    pub source: String,
    /// Path relative to the application's base directory
    pub filename: String,
    /// Derived at load time from the favorites ledger, never stored in the catalog file
    pub favorite: bool,
}

impl Record {
    /// Serialize back into the one-line catalog format.
    ///
    /// The counterpart of [`RecordParser::parse_line`]: parsing the
    /// returned line yields an equal record (with `favorite` false).
    pub fn to_line(&self) -> String {
        format!(
            "name: {}, categories: [{}], source: {}, filename: {}",
            self.name,
            self.categories.join(", "),
            self.source,
            self.filename
        )
    }
}

/// Line parser for the catalog file
pub struct RecordParser {
    pattern: Regex,
}

impl RecordParser {
    pub fn new() -> Self {
        Self {
            // Non-greedy so field values may contain commas, as long as
            // they don't contain a later field label.
            pattern: Regex::new(r"^name: (.*?), categories: (.*?), source: (.*?), filename: (.*)$")
                .unwrap(),
        }
    }

    /// Parse one line of the catalog file.
    ///
    /// Returns `None` for lines that don't match the record shape;
    /// malformed lines are skipped rather than reported.
    pub fn parse_line(&self, line: &str) -> Option<Record> {
        let captures = self.pattern.captures(line.trim())?;

        let name = captures[1].trim().to_string();
        let categories = captures[2]
            .replace(['[', ']', '\''], "")
            .split(',')
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(str::to_string)
            .collect();
        let source = captures[3].trim();
        let source = if source.is_empty() {
            "unknown".to_string()
        } else {
            source.to_string()
        };
        let filename = captures[4].trim().to_string();

        Some(Record {
            name,
            categories,
            source,
            filename,
            favorite: false,
        })
    }
}

impl Default for RecordParser {
    fn default() -> Self {
        Self::new()
    }
}
