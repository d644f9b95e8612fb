use crate::error::CuadreError;
use crate::extraction::{BBox, PageWords, PdfExtractor, Word};
use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

const POLL_INTERVAL: Duration = Duration::from_millis(20);

/// PDF extraction backend using pdftotext (from poppler-utils).
///
/// Uses `pdftotext -bbox` so every word comes with its bounding box, which
/// table detection needs to infer columns.
pub struct PdftotextExtractor {
    binary: PathBuf,
    timeout: Duration,
}

impl PdftotextExtractor {
    pub fn new() -> Self {
        PdftotextExtractor {
            binary: PathBuf::from("pdftotext"),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Use a specific pdftotext executable instead of the one on PATH.
    pub fn with_binary(mut self, binary: impl Into<PathBuf>) -> Self {
        self.binary = binary.into();
        self
    }

    /// Kill pdftotext if it runs longer than `timeout`.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for PdftotextExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfExtractor for PdftotextExtractor {
    fn extract_pages(&self, path: &Path) -> Result<Vec<PageWords>, CuadreError> {
        if !path.exists() {
            return Err(CuadreError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("{} does not exist", path.display()),
            )));
        }

        let child = Command::new(&self.binary)
            .arg("-bbox")
            .arg(path)
            .arg("-") // output to stdout
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    CuadreError::PdftotextNotFound
                } else {
                    CuadreError::Extraction(format!("pdftotext failed: {}", e))
                }
            })?;

        let started = Instant::now();
        let (stdout, stderr) = wait_with_timeout(child, self.timeout)?;
        log::debug!(
            "pdftotext finished for {} in {:?} ({} bytes)",
            path.display(),
            started.elapsed(),
            stdout.len()
        );

        let xml = String::from_utf8_lossy(&stdout);
        let pages = parse_bbox_xml(&xml)?;
        if pages.is_empty() && !stderr.is_empty() {
            log::warn!(
                "pdftotext produced no pages: {}",
                String::from_utf8_lossy(&stderr).trim()
            );
        }
        Ok(pages)
    }

    fn backend_name(&self) -> &str {
        "pdftotext"
    }
}

/// Wait for the child, draining its pipes on helper threads so a large
/// document cannot block it on a full pipe.
fn wait_with_timeout(
    mut child: Child,
    timeout: Duration,
) -> Result<(Vec<u8>, Vec<u8>), CuadreError> {
    let stdout_reader = spawn_reader(child.stdout.take());
    let stderr_reader = spawn_reader(child.stderr.take());

    let deadline = Instant::now() + timeout;
    let status = loop {
        if let Some(status) = child.try_wait()? {
            break status;
        }
        if Instant::now() >= deadline {
            let _ = child.kill();
            let _ = child.wait();
            return Err(CuadreError::Timeout(timeout));
        }
        thread::sleep(POLL_INTERVAL);
    };

    let stdout = join_reader(stdout_reader)?;
    let stderr = join_reader(stderr_reader)?;

    if !status.success() {
        let code = status.code().unwrap_or(-1);
        let stderr = String::from_utf8_lossy(&stderr).trim().to_string();
        return Err(CuadreError::PdftotextFailed { code, stderr });
    }

    Ok((stdout, stderr))
}

fn spawn_reader<R: Read + Send + 'static>(
    pipe: Option<R>,
) -> thread::JoinHandle<std::io::Result<Vec<u8>>> {
    thread::spawn(move || {
        let mut buf = Vec::new();
        if let Some(mut pipe) = pipe {
            pipe.read_to_end(&mut buf)?;
        }
        Ok(buf)
    })
}

fn join_reader(
    handle: thread::JoinHandle<std::io::Result<Vec<u8>>>,
) -> Result<Vec<u8>, CuadreError> {
    let bytes = handle
        .join()
        .map_err(|_| CuadreError::Extraction("pdftotext output reader panicked".into()))??;
    Ok(bytes)
}

/// Parse `pdftotext -bbox` XHTML into per-page word lists.
///
/// Pages are numbered from 1 in document order.
pub fn parse_bbox_xml(xml: &str) -> Result<Vec<PageWords>, CuadreError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut pages = Vec::new();
    let mut current_page: Option<PageWords> = None;
    let mut current_bbox: Option<BBox> = None;
    let mut current_text = String::new();

    loop {
        match reader.read_event()? {
            Event::Start(tag) => match tag.name().as_ref() {
                b"page" => {
                    current_page = Some(PageWords {
                        page_number: pages.len() + 1,
                        words: Vec::new(),
                    });
                }
                b"word" => {
                    current_bbox = parse_bbox(&tag);
                    current_text.clear();
                }
                _ => {}
            },
            Event::Empty(tag) if tag.name().as_ref() == b"page" => {
                pages.push(PageWords {
                    page_number: pages.len() + 1,
                    words: Vec::new(),
                });
            }
            Event::Text(text) if current_bbox.is_some() => {
                current_text.push_str(&text.unescape()?);
            }
            Event::End(tag) => match tag.name().as_ref() {
                b"word" => {
                    if let (Some(page), Some(bbox)) =
                        (current_page.as_mut(), current_bbox.take())
                    {
                        let text = current_text.trim();
                        if !text.is_empty() {
                            page.words.push(Word {
                                text: text.to_string(),
                                bbox,
                            });
                        }
                    }
                    current_text.clear();
                }
                b"page" => {
                    if let Some(page) = current_page.take() {
                        pages.push(page);
                    }
                }
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(pages)
}

fn parse_bbox(tag: &BytesStart) -> Option<BBox> {
    Some(BBox {
        x_min: parse_attr_f32(tag, b"xMin")?,
        y_min: parse_attr_f32(tag, b"yMin")?,
        x_max: parse_attr_f32(tag, b"xMax")?,
        y_max: parse_attr_f32(tag, b"yMax")?,
    })
}

fn parse_attr_f32(tag: &BytesStart, name: &[u8]) -> Option<f32> {
    tag.attributes()
        .flatten()
        .find(|attr| attr.key.as_ref() == name)
        .and_then(|attr| std::str::from_utf8(&attr.value).ok()?.parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    const BBOX_XML: &str = r#"<!DOCTYPE html PUBLIC "-//W3C//DTD XHTML 1.0 Transitional//EN" "http://www.w3.org/TR/xhtml1/DTD/xhtml1-transitional.dtd">
<html xmlns="http://www.w3.org/1999/xhtml">
<head>
<title></title>
<meta name="Producer" content="Test"/>
</head>
<body>
<doc>
  <page width="612.000000" height="792.000000">
    <word xMin="10.000000" yMin="20.000000" xMax="40.000000" yMax="30.000000">Recarga</word>
    <word xMin="42.000000" yMin="20.000000" xMax="70.000000" yMax="30.000000">Movil</word>
  </page>
  <page width="612.000000" height="792.000000">
    <word xMin="10.000000" yMin="20.000000" xMax="40.000000" yMax="30.000000">P&amp;G</word>
  </page>
</doc>
</body>
</html>
"#;

    #[test]
    fn test_parse_bbox_xml_pages_and_words() {
        let pages = parse_bbox_xml(BBOX_XML).unwrap();
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].page_number, 1);
        assert_eq!(pages[0].words.len(), 2);
        assert_eq!(pages[0].words[1].text, "Movil");
        assert_eq!(pages[0].words[1].bbox.x_min, 42.0);
        assert_eq!(pages[1].page_number, 2);
    }

    #[test]
    fn test_parse_bbox_xml_unescapes_entities() {
        let pages = parse_bbox_xml(BBOX_XML).unwrap();
        assert_eq!(pages[1].words[0].text, "P&G");
    }

    #[test]
    fn test_missing_binary_reports_not_found() {
        let file = tempfile::Builder::new().suffix(".pdf").tempfile().unwrap();
        let extractor = PdftotextExtractor::new().with_binary("/nonexistent/pdftotext-binary");
        let err = extractor.extract_pages(file.path()).unwrap_err();
        assert!(matches!(err, CuadreError::PdftotextNotFound));
    }

    #[test]
    fn test_missing_file_is_io_not_found() {
        let extractor = PdftotextExtractor::new();
        let err = extractor
            .extract_pages(Path::new("/nonexistent/statement.pdf"))
            .unwrap_err();
        assert!(matches!(err, CuadreError::Io(ref e) if e.kind() == std::io::ErrorKind::NotFound));
    }
}
