use crate::parse::LabelFile;
use crate::refs::{ObjectReferences, RefType};
use chrono::{DateTime, Datelike, Local, Timelike};
use pdf_writer::{Date, Pdf, TextStr};

/// Document metadata written to the PDF's information dictionary
#[derive(Default, Debug, Clone, PartialEq)]
pub struct Info {
    /// Usually the label file's name
    pub title: Option<String>,
    /// A one-line description of the sheet's contents
    pub subject: Option<String>,
    /// Comma separated
    pub keywords: Option<String>,
}

impl Info {
    pub fn new() -> Info {
        Info::default()
    }

    /// Metadata describing a sheet printed from `labels`
    pub fn label_sheet<S: ToString>(title: S, labels: &LabelFile) -> Info {
        let total = labels.total_instances();
        Info {
            title: Some(title.to_string()),
            subject: Some(format!(
                "{total} pin label{} from {} block{}, up to {} characters wide",
                if total == 1 { "" } else { "s" },
                labels.blocks.len(),
                if labels.blocks.len() == 1 { "" } else { "s" },
                labels.max_width,
            )),
            keywords: Some("pin labels, specimen labels".to_string()),
        }
    }

    pub fn title<S: ToString>(&mut self, title: S) -> &mut Self {
        self.title = Some(title.to_string());
        self
    }

    pub fn subject<S: ToString>(&mut self, subject: S) -> &mut Self {
        self.subject = Some(subject.to_string());
        self
    }

    pub fn keywords<S: ToString>(&mut self, keywords: S) -> &mut Self {
        self.keywords = Some(keywords.to_string());
        self
    }

    pub(crate) fn write(&self, refs: &mut ObjectReferences, writer: &mut Pdf) {
        let mut dict = writer.document_info(refs.gen(RefType::Info));
        if let Some(title) = &self.title {
            dict.title(TextStr(title.as_str()));
        }
        if let Some(subject) = &self.subject {
            dict.subject(TextStr(subject.as_str()));
        }
        if let Some(keywords) = &self.keywords {
            dict.keywords(TextStr(keywords.as_str()));
        }
        dict.creator(TextStr(concat!(
            env!("CARGO_PKG_NAME"),
            " v",
            env!("CARGO_PKG_VERSION")
        )));
        dict.creation_date(pdf_date(Local::now()));
    }
}

fn pdf_date(at: DateTime<Local>) -> Date {
    let offset_minutes = at.offset().local_minus_utc() / 60;
    Date::new(at.year() as u16)
        .month(at.month() as u8)
        .day(at.day() as u8)
        .hour(at.hour() as u8)
        .minute(at.minute() as u8)
        .second(at.second() as u8)
        .utc_offset_hour((offset_minutes / 60) as i8)
        .utc_offset_minute((offset_minutes % 60).unsigned_abs() as u8)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::parse;

    #[test]
    fn label_sheet_describes_the_file() {
        let labels = parse("9\n3\nMANAUS\n1\nHOLOTYPE\n").expect("valid file");
        let info = Info::label_sheet("manaus", &labels);
        assert_eq!(info.title.as_deref(), Some("manaus"));
        assert_eq!(
            info.subject.as_deref(),
            Some("4 pin labels from 2 blocks, up to 9 characters wide")
        );
    }

    #[test]
    fn written_metadata_is_readable_in_the_pdf() {
        let mut info = Info::new();
        info.title("drawer 12").keywords("beetles");
        let mut refs = ObjectReferences::new();
        let mut writer = Pdf::new();
        info.write(&mut refs, &mut writer);
        let bytes = writer.finish();
        let text = String::from_utf8_lossy(&bytes);
        assert!(text.contains("(drawer 12)"));
        assert!(text.contains("(beetles)"));
        assert!(!text.contains("/Subject"));
        assert!(refs.get(RefType::Info).is_some());
    }
}
