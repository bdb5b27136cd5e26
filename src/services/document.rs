//! Document text extraction and chunking.

use std::io::Read;
use std::path::Path;
use std::sync::OnceLock;

use async_trait::async_trait;
use regex::{Captures, Regex};

use crate::error::{AppError, Result};
use crate::services::DocumentReader;
use crate::validation::extension_of;

/// Words per chunk when summarizing long documents
pub const CHUNK_WORDS: usize = 1000;

/// Part of a `.docx` archive holding the body text
const DOCX_BODY: &str = "word/document.xml";

// == File Text Reader ==
/// Reads `.txt`, `.md`, `.html`, `.pdf` and `.docx` documents.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileTextReader;

#[async_trait]
impl DocumentReader for FileTextReader {
    async fn read(&self, path: &Path) -> Result<String> {
        let ext = extension_of(path);
        let convert: fn(&str) -> String = match ext.as_str() {
            ".txt" => str::to_string,
            ".md" => strip_markdown,
            ".html" | ".htm" => html_to_text,
            ".pdf" => return read_binary(path, &ext, pdf_text).await,
            ".docx" => return read_binary(path, &ext, docx_text).await,
            _ => {
                return Err(AppError::Service(format!(
                    "⚠️ Unsupported file type: {}",
                    if ext.is_empty() { "(none)" } else { ext.as_str() }
                )))
            }
        };

        let raw = tokio::fs::read_to_string(path).await.map_err(|e| {
            AppError::Service(format!("⚠️ Could not read {}: {}", path.display(), e))
        })?;
        Ok(convert(&raw))
    }
}

/// Loads the file and runs `extract` on a blocking thread.
///
/// A panic inside the extractor is reported like any other read failure.
async fn read_binary(
    path: &Path,
    ext: &str,
    extract: fn(&[u8]) -> std::result::Result<String, String>,
) -> Result<String> {
    let bytes = tokio::fs::read(path).await.map_err(|e| {
        AppError::Service(format!("⚠️ Could not read {}: {}", path.display(), e))
    })?;

    let extracted = tokio::task::spawn_blocking(move || extract(&bytes))
        .await
        .map_err(|e| e.to_string())
        .and_then(|r| r);

    match extracted {
        Ok(text) => Ok(text.trim().to_string()),
        Err(e) => Err(AppError::Service(format!(
            "⚠️ Could not read {} file: {}",
            ext, e
        ))),
    }
}

// == PDF ==
fn pdf_text(bytes: &[u8]) -> std::result::Result<String, String> {
    pdf_extract::extract_text_from_mem(bytes).map_err(|e| e.to_string())
}

// == DOCX ==
fn docx_run_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)<w:t(?:\s[^>]*)?>(.*?)</w:t>").expect("valid regex"))
}

fn docx_text(bytes: &[u8]) -> std::result::Result<String, String> {
    let mut archive =
        zip::ZipArchive::new(std::io::Cursor::new(bytes)).map_err(|e| e.to_string())?;
    let mut xml = String::new();
    archive
        .by_name(DOCX_BODY)
        .map_err(|e| format!("{}: {}", DOCX_BODY, e))?
        .read_to_string(&mut xml)
        .map_err(|e| e.to_string())?;

    // One output line per <w:p> paragraph, runs concatenated
    let paragraphs: Vec<String> = xml
        .split("</w:p>")
        .map(|para| {
            docx_run_re()
                .captures_iter(para)
                .filter_map(|cap| cap.get(1))
                .map(|m| decode_entities(m.as_str()))
                .collect::<String>()
        })
        .collect();

    // The split leaves the trailing body section as a final empty piece
    let end = paragraphs
        .iter()
        .rposition(|p| !p.is_empty())
        .map_or(0, |i| i + 1);
    Ok(paragraphs[..end].join("\n"))
}

// == Chunking ==
/// Splits text into chunks of at most `max_words` whitespace-separated words.
pub fn chunk_text(text: &str, max_words: usize) -> Vec<String> {
    let words: Vec<&str> = text.split_whitespace().collect();
    words
        .chunks(max_words.max(1))
        .map(|chunk| chunk.join(" "))
        .collect()
}

// == Markdown ==
fn code_block_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)```.*?```").expect("valid regex"))
}

fn header_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"#+\s*").expect("valid regex"))
}

fn emphasis_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\*\*|__|\*|_").expect("valid regex"))
}

/// Removes code blocks, header markers and emphasis from markdown.
pub fn strip_markdown(text: &str) -> String {
    let text = code_block_re().replace_all(text, "");
    let text = header_re().replace_all(&text, "");
    let text = emphasis_re().replace_all(&text, "");
    text.trim().to_string()
}

// == HTML ==
fn hidden_block_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?is)<(script|style|noscript|nav|header|footer)\b[^>]*>.*?</(script|style|noscript|nav|header|footer)\s*>")
            .expect("valid regex")
    })
}

fn paragraph_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?is)<p\b[^>]*>(.*?)</p\s*>").expect("valid regex"))
}

fn tag_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)<[^>]*>").expect("valid regex"))
}

fn whitespace_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s+").expect("valid regex"))
}

fn entity_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"&(#[0-9]{1,7}|#[xX][0-9a-fA-F]{1,6}|[a-zA-Z]{2,8});").expect("valid regex"))
}

fn named_entity(name: &str) -> Option<char> {
    Some(match name {
        "amp" => '&',
        "lt" => '<',
        "gt" => '>',
        "quot" => '"',
        "apos" => '\'',
        "nbsp" => ' ',
        "ndash" => '\u{2013}',
        "mdash" => '\u{2014}',
        "lsquo" => '\u{2018}',
        "rsquo" => '\u{2019}',
        "ldquo" => '\u{201C}',
        "rdquo" => '\u{201D}',
        "hellip" => '\u{2026}',
        "copy" => '\u{00A9}',
        "reg" => '\u{00AE}',
        "trade" => '\u{2122}',
        "euro" => '\u{20AC}',
        "laquo" => '\u{00AB}',
        "raquo" => '\u{00BB}',
        _ => return None,
    })
}

/// Decodes numeric references and common named entities in one pass.
///
/// Unknown entities are left as written.
fn decode_entities(text: &str) -> String {
    entity_re()
        .replace_all(text, |caps: &Captures| {
            let body = &caps[1];
            let decoded = match body.strip_prefix('#') {
                Some(num) => match num.strip_prefix(['x', 'X']) {
                    Some(hex) => u32::from_str_radix(hex, 16).ok(),
                    None => num.parse::<u32>().ok(),
                }
                .and_then(char::from_u32),
                None => named_entity(body),
            };
            decoded.map_or_else(|| caps[0].to_string(), String::from)
        })
        .into_owned()
}

fn clean_fragment(fragment: &str) -> String {
    let text = tag_re().replace_all(fragment, " ");
    let text = decode_entities(&text);
    whitespace_re().replace_all(&text, " ").trim().to_string()
}

/// Returns the visible text of an HTML document.
pub fn html_to_text(html: &str) -> String {
    let visible = hidden_block_re().replace_all(html, " ");
    clean_fragment(&visible)
}

/// Returns the non-empty paragraph texts of an HTML document, in order.
pub fn extract_paragraphs(html: &str) -> Vec<String> {
    let visible = hidden_block_re().replace_all(html, " ");
    paragraph_re()
        .captures_iter(&visible)
        .filter_map(|cap| cap.get(1))
        .map(|m| clean_fragment(m.as_str()))
        .filter(|p| !p.is_empty())
        .collect()
}
