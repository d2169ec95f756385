//! CSV import and export.
//!
//! The format is the four columns `Name,Email,Phone,Tags`, with tags joined
//! by `;`. Every exported field is quoted.

use crate::domain::ContactId;
use crate::error::{ImportError, ImportResult};
use crate::models::Contact;

const HEADER: &str = "Name,Email,Phone,Tags";

fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

/// Render contacts as CSV text.
///
/// An empty list still produces the header line.
pub fn contacts_to_csv(contacts: &[Contact]) -> String {
    if contacts.is_empty() {
        return format!("{}\n", HEADER);
    }

    let mut rows = Vec::with_capacity(contacts.len() + 1);
    rows.push(HEADER.to_string());
    for contact in contacts {
        let row = [
            quote(&contact.name),
            quote(&contact.email),
            quote(&contact.phone),
            quote(&contact.tags.join(";")),
        ];
        rows.push(row.join(","));
    }
    rows.join("\n")
}

/// Parse CSV text into contacts.
///
/// The first line is treated as a header and ignored. Rows with fewer than
/// three fields, or with a blank name or email, are skipped. Every parsed
/// contact gets a generated id.
///
/// # Errors
///
/// Returns `ImportError::NotEnoughRows` if the text has no data row.
pub fn csv_to_contacts(text: &str) -> ImportResult<Vec<Contact>> {
    let lines: Vec<&str> = text.trim().lines().collect();
    if lines.len() < 2 {
        return Err(ImportError::NotEnoughRows);
    }

    let mut contacts = Vec::new();
    for (index, line) in lines.iter().enumerate().skip(1) {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let mut values = parse_csv_line(line).into_iter();
        let (Some(name), Some(email), Some(phone)) = (values.next(), values.next(), values.next())
        else {
            tracing::debug!(line = index + 1, "Skipping short CSV row");
            continue;
        };
        let tags: Vec<String> = values
            .next()
            .map(|raw| {
                raw.split(';')
                    .filter(|tag| !tag.trim().is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        if name.trim().is_empty() || email.trim().is_empty() {
            tracing::debug!(line = index + 1, "Skipping CSV row without name or email");
            continue;
        }

        contacts.push(
            Contact::new(ContactId::generated(index), name, email, phone).with_tags(tags),
        );
    }

    Ok(contacts)
}

/// Split one CSV line into trimmed fields.
///
/// Double quotes toggle quoting and `""` inside quotes is a literal quote.
/// Commas inside quotes do not split.
pub fn parse_csv_line(line: &str) -> Vec<String> {
    let mut values = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                current.push('"');
                chars.next();
            }
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => {
                values.push(current.trim().to_string());
                current.clear();
            }
            _ => current.push(c),
        }
    }

    values.push(current.trim().to_string());
    values
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_empty() {
        assert_eq!(contacts_to_csv(&[]), "Name,Email,Phone,Tags\n");
    }

    #[test]
    fn test_export_quotes_fields() {
        let contacts = vec![Contact::new(1, "Bob \"B\" Jones", "bob@x.com", "555")
            .with_tags(vec!["work", "family"])];
        assert_eq!(
            contacts_to_csv(&contacts),
            "Name,Email,Phone,Tags\n\"Bob \"\"B\"\" Jones\",\"bob@x.com\",\"555\",\"work;family\""
        );
    }

    #[test]
    fn test_parse_line_handles_quotes() {
        assert_eq!(
            parse_csv_line(r#""Smith, Ann","a@x.com", 555 ,"say ""hi""""#),
            vec!["Smith, Ann", "a@x.com", "555", "say \"hi\""]
        );
        assert_eq!(parse_csv_line(""), vec![""]);
    }

    #[test]
    fn test_import_requires_data_row() {
        assert!(matches!(
            csv_to_contacts("Name,Email,Phone,Tags\n"),
            Err(ImportError::NotEnoughRows)
        ));
        assert!(matches!(csv_to_contacts(""), Err(ImportError::NotEnoughRows)));
    }

    #[test]
    fn test_import_skips_bad_rows() {
        let text = "Name,Email,Phone,Tags\n\
                    Ann,ann@x.com,555,work;;family\n\
                    Short,row\n\
                    \n\
                    ,nobody@x.com,1,\n\
                    Bob,bob@x.com,\n";
        let contacts = csv_to_contacts(text).unwrap();

        assert_eq!(contacts.len(), 2);
        assert_eq!(contacts[0].name, "Ann");
        assert_eq!(contacts[0].tags, vec!["work", "family"]);
        assert_eq!(contacts[1].name, "Bob");
        assert!(contacts[1].tags.is_empty());
        assert_ne!(contacts[0].id, contacts[1].id);
    }

    #[test]
    fn test_export_then_import_keeps_fields() {
        let original =
            vec![Contact::new(1, "Ann, Jr.", "ann@x.com", "555").with_tags(vec!["work"])];
        let parsed = csv_to_contacts(&contacts_to_csv(&original)).unwrap();

        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].name, "Ann, Jr.");
        assert_eq!(parsed[0].tags, vec!["work"]);
    }
}
