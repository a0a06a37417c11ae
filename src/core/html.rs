// src/core/html.rs
//
// Loads a saved page into the three views the document readers need:
// the <title> text, the raw <body> text (line breaks preserved), and the
// card sections of the application template:
//
//   <div class="card">
//     <div class="card-header">2. Gender</div>
//     <div class="card-body">Female</div>
//   </div>

use scraper::{ElementRef, Html, Selector};

/// One labeled card: header text + body text, both untrimmed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Section {
    pub header: String,
    pub body: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Page {
    pub title: String,
    pub text: String,
    pub sections: Vec<Section>,
    /// Every card body in document order, including ones without a header.
    pub blocks: Vec<String>,
}

impl Page {
    pub fn parse(html: &str) -> Self {
        let doc = Html::parse_document(html);

        let title = first_text(&doc, "title")
            .map(|t| t.trim().to_string())
            .unwrap_or_default();

        let text = first_text(&doc, "body")
            .unwrap_or_else(|| doc.root_element().text().collect());

        Self {
            title,
            text,
            sections: collect_sections(&doc),
            blocks: all_texts(&doc, "div.card-body"),
        }
    }

    /// Page over plain text (no markup involved).
    pub fn from_text(text: &str) -> Self {
        Self { text: s!(text), ..Self::default() }
    }

    /// Page made of already-split sections (no markup involved).
    #[cfg(test)]
    pub fn from_sections(sections: Vec<Section>) -> Self {
        let blocks = sections.iter().map(|s| s.body.clone()).collect();
        Self { sections, blocks, ..Self::default() }
    }

    /// First section whose header contains `label`.
    pub fn section(&self, label: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.header.contains(label))
    }

    /// First card body whose text contains `label`.
    pub fn block_containing(&self, label: &str) -> Option<&str> {
        self.blocks.iter().find(|b| b.contains(label)).map(String::as_str)
    }

    pub fn is_blank(&self) -> bool {
        self.title.trim().is_empty() && self.text.trim().is_empty()
    }
}

fn first_text(doc: &Html, css: &str) -> Option<String> {
    let sel = Selector::parse(css).ok()?;
    doc.select(&sel).next().map(|el| el.text().collect())
}

fn all_texts(doc: &Html, css: &str) -> Vec<String> {
    match Selector::parse(css) {
        Ok(sel) => doc.select(&sel).map(|el| el.text().collect()).collect(),
        Err(_) => Vec::new(),
    }
}

/// Header = `div.card-header`; its body = every `div.card-body` under the header's parent.
fn collect_sections(doc: &Html) -> Vec<Section> {
    let (Ok(header_sel), Ok(body_sel)) = (
        Selector::parse("div.card-header"),
        Selector::parse("div.card-body"),
    ) else {
        return Vec::new();
    };

    doc.select(&header_sel)
        .map(|header| {
            let body = header
                .parent()
                .and_then(ElementRef::wrap)
                .map(|card| {
                    card.select(&body_sel)
                        .flat_map(|b| b.text())
                        .collect::<String>()
                })
                .unwrap_or_default();
            Section { header: header.text().collect(), body }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const CARDS: &str = r#"
        <html><head><title> Electronic Diversity Visa Program - Entry Form </title></head>
        <body>
          <div class="card">
            <div class="card-header">2. Gender</div>
            <div class="card-body">
              Female
            </div>
          </div>
          <div class="card">
            <div class="card-header">11. E-mail Address</div>
            <div class="card-body"><p>jane@example.com</p>
            <p>Confirm</p></div>
          </div>
          <div class="card-body">b. First Name JANE c. Middle Name</div>
        </body></html>
    "#;

    #[test]
    fn title_is_trimmed() {
        let page = Page::parse(CARDS);
        assert_eq!(page.title, "Electronic Diversity Visa Program - Entry Form");
    }

    #[test]
    fn sections_pair_headers_with_bodies() {
        let page = Page::parse(CARDS);
        assert_eq!(page.sections.len(), 2);
        let gender = page.section("2. Gender").unwrap();
        assert_eq!(gender.body.trim(), "Female");
        let email = page.section("E-mail").unwrap();
        assert!(email.body.contains("jane@example.com\n"));
    }

    #[test]
    fn blocks_include_headerless_bodies() {
        let page = Page::parse(CARDS);
        assert_eq!(page.blocks.len(), 3);
        assert!(page.block_containing("b. First Name").unwrap().contains("JANE"));
    }

    #[test]
    fn plain_text_lands_in_body() {
        let page = Page::parse("Entrant Name: Jane Doe\nYear of Birth: 1990");
        assert!(page.text.contains("Entrant Name: Jane Doe\n"));
        assert!(page.sections.is_empty());
        assert!(!page.is_blank());
    }

    #[test]
    fn empty_input_is_blank() {
        assert!(Page::parse("").is_blank());
        assert!(Page::parse("<html><body>   </body></html>").is_blank());
    }
}
