//! PDF document assembly with `lopdf`.

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Document, Object, Stream, StringFormat};

use crate::error::RenderError;

use super::font::{encode_win_ansi, Font};
use super::layout::{PageLayout, TextRun, PAGE_HEIGHT, PAGE_WIDTH};

/// Encode laid-out pages into PDF bytes.
pub fn write_document(pages: &[PageLayout]) -> Result<Vec<u8>, RenderError> {
    let mut doc = Document::with_version("1.7");
    let pages_id = doc.new_object_id();

    let mut fonts = Dictionary::new();
    for font in Font::ALL {
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => font.base_name(),
            "Encoding" => "WinAnsiEncoding",
        });
        fonts.set(font.resource_name(), font_id);
    }
    let resources_id = doc.add_object(dictionary! {
        "Font" => fonts,
    });

    let mut kids = Vec::with_capacity(pages.len());
    for page in pages {
        let content = Content {
            operations: page_operations(page),
        };
        let encoded = content
            .encode()
            .map_err(|e| RenderError::RenderFailed(format!("content stream: {}", e)))?;
        let content_id = doc.add_object(Stream::new(dictionary! {}, encoded));

        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(Object::Reference(page_id));
    }

    let page_count = kids.len() as i64;
    let pages_dict = dictionary! {
        "Type" => "Pages",
        "Kids" => kids,
        "Count" => page_count,
        "Resources" => resources_id,
        "MediaBox" => vec![0.into(), 0.into(), PAGE_WIDTH.into(), PAGE_HEIGHT.into()],
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages_dict));

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes)
        .map_err(|e| RenderError::RenderFailed(format!("write: {}", e)))?;

    Ok(bytes)
}

/// Content stream operations drawing every run of a page.
fn page_operations(page: &PageLayout) -> Vec<Operation> {
    let mut operations = Vec::with_capacity(page.runs.len() * 5);
    for run in page.runs.iter().filter(|run| !run.text.is_empty()) {
        operations.extend(text_operations(run));
    }
    operations
}

fn text_operations(run: &TextRun) -> [Operation; 5] {
    [
        Operation::new("BT", vec![]),
        Operation::new(
            "Tf",
            vec![
                Object::Name(run.font.resource_name().as_bytes().to_vec()),
                run.size.into(),
            ],
        ),
        Operation::new("Td", vec![run.x.into(), run.y.into()]),
        Operation::new(
            "Tj",
            vec![Object::String(encode_win_ansi(&run.text), StringFormat::Literal)],
        ),
        Operation::new("ET", vec![]),
    ]
}
