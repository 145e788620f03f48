//! Use-case document reader/writer.
//!
//! Document shape (element order is significant):
//!
//! ```text
//! yukonConfig
//!   projectDirectory   text
//!   useCases           optional on read, always written
//!     useCase*
//!       name           text
//!       methods
//!         method*      text
//! ```
//!
//! Reading is all-or-nothing: the first structural mismatch aborts with
//! `MalformedDocument` and no partial config is returned.

use crate::domain::use_case::{ProjectConfig, UseCaseDefinition};
use crate::error::{Result, YukonError};
use crate::ports::ConfigStore;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};
use std::fs;
use std::path::Path;
use tracing::{debug, info};

const ROOT: &str = "yukonConfig";
const PROJECT_DIRECTORY: &str = "projectDirectory";
const USE_CASES: &str = "useCases";
const USE_CASE: &str = "useCase";
const NAME: &str = "name";
const METHODS: &str = "methods";
const METHOD: &str = "method";

/// File-backed use-case document.
pub struct ConfigDocument;

impl ConfigDocument {
    /// Read and parse the document at `path`.
    pub fn read(path: &Path) -> Result<ProjectConfig> {
        let bytes = fs::read(path).map_err(|e| YukonError::io(path, e))?;
        let text = decode(&bytes)?;
        let config = Self::parse(&text)?;
        info!(
            path = %path.display(),
            use_cases = config.use_cases.len(),
            "Loaded use-case document"
        );
        Ok(config)
    }

    /// Serialize `config` to `path`.
    ///
    /// The document is written to a sibling temporary file first and then
    /// renamed over `path`, so a failed write leaves the old file intact.
    pub fn write(config: &ProjectConfig, path: &Path) -> Result<()> {
        let bytes = render(config).map_err(|e| YukonError::io(path, e))?;

        let mut tmp_name = path.as_os_str().to_owned();
        tmp_name.push(".tmp");
        let tmp_path = Path::new(&tmp_name);

        fs::write(tmp_path, &bytes).map_err(|e| YukonError::io(tmp_path, e))?;
        if let Err(e) = fs::rename(tmp_path, path) {
            let _ = fs::remove_file(tmp_path);
            return Err(YukonError::io(path, e));
        }

        info!(
            path = %path.display(),
            use_cases = config.use_cases.len(),
            "Wrote use-case document"
        );
        Ok(())
    }

    /// Parse document text.
    pub fn parse(text: &str) -> Result<ProjectConfig> {
        let mut cursor = EventCursor::new(text);

        if !cursor.open(ROOT)? {
            return Err(YukonError::malformed(format!(
                "<{}> has no <{}>",
                ROOT, PROJECT_DIRECTORY
            )));
        }
        let project_directory = cursor.leaf(PROJECT_DIRECTORY)?;

        let mut use_cases = Vec::new();
        if cursor.at_start(USE_CASES)? && cursor.open(USE_CASES)? {
            while cursor.at_start(USE_CASE)? {
                use_cases.push(read_use_case(&mut cursor)?);
            }
            cursor.close(USE_CASES)?;
        }

        cursor.close(ROOT)?;
        cursor.finish()?;

        debug!(use_cases = use_cases.len(), "Parsed use-case document");
        Ok(ProjectConfig::from_parts(project_directory, use_cases))
    }

    /// Render `config` as document text.
    pub fn to_xml_string(config: &ProjectConfig) -> Result<String> {
        let bytes = render(config).map_err(|e| YukonError::io("<memory>", e))?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

impl ConfigStore for ConfigDocument {
    fn read(&self, path: &Path) -> Result<ProjectConfig> {
        ConfigDocument::read(path)
    }

    fn write(&self, config: &ProjectConfig, path: &Path) -> Result<()> {
        ConfigDocument::write(config, path)
    }
}

fn read_use_case(cursor: &mut EventCursor<'_>) -> Result<UseCaseDefinition> {
    if !cursor.open(USE_CASE)? {
        return Err(YukonError::malformed(format!(
            "<{}> must contain <{}> and <{}>",
            USE_CASE, NAME, METHODS
        )));
    }
    let mut use_case = UseCaseDefinition::new(cursor.leaf(NAME)?);

    if cursor.open(METHODS)? {
        while cursor.at_start(METHOD)? {
            use_case.methods.push(cursor.leaf(METHOD)?);
        }
        cursor.close(METHODS)?;
    }

    cursor.close(USE_CASE)?;
    Ok(use_case)
}

// ═══════════════════════════════════════════════════════════════════════════
// Reading
// ═══════════════════════════════════════════════════════════════════════════

/// Decode raw file bytes. UTF-16 needs a byte-order mark; anything else is
/// taken as UTF-8.
fn decode(bytes: &[u8]) -> Result<String> {
    match bytes {
        [0xEF, 0xBB, 0xBF, rest @ ..] => utf8(rest),
        [0xFF, 0xFE, rest @ ..] => utf16(rest, u16::from_le_bytes),
        [0xFE, 0xFF, rest @ ..] => utf16(rest, u16::from_be_bytes),
        _ => utf8(bytes),
    }
}

fn utf8(bytes: &[u8]) -> Result<String> {
    String::from_utf8(bytes.to_vec())
        .map_err(|e| YukonError::malformed(format!("document is not valid UTF-8: {}", e)))
}

fn utf16(bytes: &[u8], unit: fn([u8; 2]) -> u16) -> Result<String> {
    if bytes.len() % 2 != 0 {
        return Err(YukonError::malformed("UTF-16 document has an odd byte count"));
    }
    let units: Vec<u16> = bytes
        .chunks_exact(2)
        .map(|pair| unit([pair[0], pair[1]]))
        .collect();
    String::from_utf16(&units)
        .map_err(|e| YukonError::malformed(format!("document is not valid UTF-16: {}", e)))
}

/// Pull-style cursor over significant events (elements and leaf text).
struct EventCursor<'a> {
    reader: Reader<&'a [u8]>,
    peeked: Option<Event<'a>>,
}

impl<'a> EventCursor<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            reader: Reader::from_str(text),
            peeked: None,
        }
    }

    fn raw_next(&mut self) -> Result<Event<'a>> {
        match self.reader.read_event() {
            Ok(event) => Ok(event),
            Err(e) => Err(YukonError::malformed(format!(
                "at byte {}: {}",
                self.reader.buffer_position(),
                e
            ))),
        }
    }

    /// Next event, skipping declarations, comments and blank text.
    fn next_significant(&mut self) -> Result<Event<'a>> {
        if let Some(event) = self.peeked.take() {
            return Ok(event);
        }
        loop {
            match self.raw_next()? {
                Event::Decl(_) | Event::Comment(_) | Event::PI(_) | Event::DocType(_) => {}
                Event::Text(t) if t.iter().all(u8::is_ascii_whitespace) => {}
                event => return Ok(event),
            }
        }
    }

    fn peek(&mut self) -> Result<&Event<'a>> {
        let event = match self.peeked.take() {
            Some(event) => event,
            None => self.next_significant()?,
        };
        Ok(self.peeked.insert(event))
    }

    /// Whether the next significant event opens `name`.
    fn at_start(&mut self, name: &str) -> Result<bool> {
        Ok(matches!(
            self.peek()?,
            Event::Start(e) | Event::Empty(e) if e.name().as_ref() == name.as_bytes()
        ))
    }

    /// Consume the opening tag of `name`. Returns `false` for `<name/>`.
    fn open(&mut self, name: &str) -> Result<bool> {
        match self.next_significant()? {
            Event::Start(e) if e.name().as_ref() == name.as_bytes() => Ok(true),
            Event::Empty(e) if e.name().as_ref() == name.as_bytes() => Ok(false),
            other => Err(unexpected(&format!("<{}>", name), &other)),
        }
    }

    fn close(&mut self, name: &str) -> Result<()> {
        match self.next_significant()? {
            Event::End(e) if e.name().as_ref() == name.as_bytes() => Ok(()),
            other => Err(unexpected(&format!("</{}>", name), &other)),
        }
    }

    /// Read a text-only element. Its text is kept exactly, whitespace included.
    fn leaf(&mut self, name: &str) -> Result<String> {
        if !self.open(name)? {
            return Ok(String::new());
        }
        let mut value = String::new();
        loop {
            match self.raw_next()? {
                Event::Text(t) => {
                    let text = t.unescape().map_err(|e| {
                        YukonError::malformed(format!("bad text in <{}>: {}", name, e))
                    })?;
                    value.push_str(&text);
                }
                Event::CData(c) => {
                    let text = std::str::from_utf8(&c).map_err(|e| {
                        YukonError::malformed(format!("bad CDATA in <{}>: {}", name, e))
                    })?;
                    value.push_str(text);
                }
                Event::Comment(_) | Event::PI(_) => {}
                Event::End(e) if e.name().as_ref() == name.as_bytes() => return Ok(value),
                other => return Err(unexpected(&format!("text or </{}>", name), &other)),
            }
        }
    }

    /// Only trailing comments or whitespace may follow the root.
    fn finish(&mut self) -> Result<()> {
        match self.next_significant()? {
            Event::Eof => Ok(()),
            other => Err(unexpected("end of document", &other)),
        }
    }
}

fn unexpected(expected: &str, found: &Event<'_>) -> YukonError {
    YukonError::malformed(format!("expected {}, found {}", expected, describe(found)))
}

fn describe(event: &Event<'_>) -> String {
    match event {
        Event::Start(e) => format!("<{}>", String::from_utf8_lossy(e.name().as_ref())),
        Event::Empty(e) => format!("<{}/>", String::from_utf8_lossy(e.name().as_ref())),
        Event::End(e) => format!("</{}>", String::from_utf8_lossy(e.name().as_ref())),
        Event::Text(_) | Event::CData(_) => "text".to_string(),
        Event::Eof => "end of document".to_string(),
        _ => "markup".to_string(),
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Writing
// ═══════════════════════════════════════════════════════════════════════════

/// Render the document as UTF-8. Empty collections are written as empty
/// elements rather than omitted.
fn render(config: &ProjectConfig) -> std::io::Result<Vec<u8>> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);

    emit(&mut writer, Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;
    start(&mut writer, ROOT)?;
    leaf(&mut writer, PROJECT_DIRECTORY, config.project_directory())?;

    start(&mut writer, USE_CASES)?;
    for use_case in &config.use_cases {
        start(&mut writer, USE_CASE)?;
        leaf(&mut writer, NAME, &use_case.name)?;
        start(&mut writer, METHODS)?;
        for method in &use_case.methods {
            leaf(&mut writer, METHOD, method)?;
        }
        end(&mut writer, METHODS)?;
        end(&mut writer, USE_CASE)?;
    }
    end(&mut writer, USE_CASES)?;
    end(&mut writer, ROOT)?;

    let mut bytes = writer.into_inner();
    bytes.push(b'\n');
    Ok(bytes)
}

fn emit(writer: &mut Writer<Vec<u8>>, event: Event<'_>) -> std::io::Result<()> {
    writer
        .write_event(event)
        .map_err(|e| std::io::Error::other(e.to_string()))
}

fn start(writer: &mut Writer<Vec<u8>>, name: &str) -> std::io::Result<()> {
    emit(writer, Event::Start(BytesStart::new(name)))
}

fn end(writer: &mut Writer<Vec<u8>>, name: &str) -> std::io::Result<()> {
    emit(writer, Event::End(BytesEnd::new(name)))
}

fn leaf(writer: &mut Writer<Vec<u8>>, name: &str, value: &str) -> std::io::Result<()> {
    start(writer, name)?;
    emit(writer, Event::Text(BytesText::new(value)))?;
    end(writer, name)
}
