use crate::types::ExtractedFile;
use regex::Regex;

/// Scan the whole markdown text for heading + code-block pairs and return
/// one `ExtractedFile` per pair, in the order the headings appear.
///
/// A pair is a heading line naming a file in backticks:
///
/// ```text
/// ### `src/app/index.ts`
/// ```
///
/// followed by a fenced code block whose opening fence carries a language
/// tag (```` ```json ````). The fence must appear before the next `###`
/// heading; a heading with no conforming fence produces no record. With
/// `strict`, only blank lines may sit between the heading line and the
/// opening fence.
///
/// Matches are non-overlapping and found left to right, so a heading
/// buried inside an earlier pair's code block is never matched again.
pub fn extract_files(markdown: &str, strict: bool, debug: bool) -> Vec<ExtractedFile> {
    let heading_re = Regex::new(r"(?m)^###[ \t]+`([^`\n]+)`").expect("heading pattern is valid");
    let fence_open_re = Regex::new(r"(?m)^```([a-zA-Z0-9]+)\n").expect("fence pattern is valid");
    let fence_close_re = Regex::new(r"(?m)^```").expect("fence pattern is valid");

    let mut records = Vec::new();
    let mut pos = 0;

    while let Some(caps) = heading_re.captures_at(markdown, pos) {
        let heading = caps.get(0).expect("whole-match group always present");
        let rel_path = caps[1].to_string();

        // Anything after the closing backtick on the heading line is ignored.
        let line_end = match markdown[heading.end()..].find('\n') {
            Some(off) => heading.end() + off + 1,
            None => markdown.len(),
        };

        // The fence has to belong to the nearest preceding heading, so the
        // search stops at the next heading line.
        let limit = heading_re
            .find_at(markdown, line_end)
            .map(|m| m.start())
            .unwrap_or(markdown.len());

        let open = fence_open_re
            .captures_at(markdown, line_end)
            .filter(|c| c.get(0).map_or(false, |m| m.start() < limit));
        let open = match open {
            Some(o) => o,
            None => {
                if debug {
                    eprintln!("Skipping heading `{}`: no code fence follows", rel_path);
                }
                pos = line_end;
                continue;
            }
        };
        let open_match = open.get(0).expect("whole-match group always present");

        if strict && !markdown[line_end..open_match.start()].trim().is_empty() {
            if debug {
                eprintln!(
                    "Skipping heading `{}`: text between heading and fence (strict)",
                    rel_path
                );
            }
            // Step over the rejected block too, so a heading line inside it
            // cannot pair with later text.
            pos = match fence_close_re.find_at(markdown, open_match.end()) {
                Some(c) => c.end(),
                None => open_match.end(),
            };
            continue;
        }

        // Content runs up to the nearest line starting with three backticks
        // (shortest span, so adjacent blocks stay independent).
        let content_start = open_match.end();
        let close = match fence_close_re.find_at(markdown, content_start) {
            Some(c) => c,
            None => {
                if debug {
                    eprintln!("Skipping heading `{}`: unterminated code fence", rel_path);
                }
                pos = line_end;
                continue;
            }
        };

        let content = markdown[content_start..close.start()].trim().to_string();
        pos = close.end();
        records.push(ExtractedFile {
            rel_path,
            language: open[1].to_string(),
            content,
        });
    }

    records
}
