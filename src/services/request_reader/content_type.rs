//! Content-type classification for GraphQL request bodies.

use mime::Mime;

/// How the GraphQL triple is carried by a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    /// No content type: nothing but the query string.
    Unset,
    /// `application/json` body.
    Json,
    /// `multipart/*` body with an `operations` field.
    Multipart,
    /// Anything else: decoded query-string / form fields.
    Fields,
}

impl ContentKind {
    pub fn classify(content_type: Option<&str>) -> Self {
        let Some(essence) = content_type.map(essence) else {
            return Self::Unset;
        };

        if essence.is_empty() {
            Self::Unset
        } else if essence.starts_with("application/json") {
            Self::Json
        } else if essence.starts_with("multipart/") {
            Self::Multipart
        } else {
            Self::Fields
        }
    }
}

/// `true` for `application/x-www-form-urlencoded`, ignoring parameters.
pub fn is_form_urlencoded(content_type: Option<&str>) -> bool {
    content_type
        .map(essence)
        .is_some_and(|e| e == mime::APPLICATION_WWW_FORM_URLENCODED.essence_str())
}

// Lowercased `type/subtype` with `;charset=`, `;boundary=` etc. dropped.
fn essence(content_type: &str) -> String {
    match content_type.trim().parse::<Mime>() {
        Ok(m) => m.essence_str().to_ascii_lowercase(),
        Err(_) => content_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_or_blank_content_type_is_unset() {
        assert_eq!(ContentKind::classify(None), ContentKind::Unset);
        assert_eq!(ContentKind::classify(Some("")), ContentKind::Unset);
        assert_eq!(ContentKind::classify(Some("   ")), ContentKind::Unset);
    }

    #[test]
    fn json_ignores_parameters_and_case() {
        assert_eq!(
            ContentKind::classify(Some("application/json")),
            ContentKind::Json
        );
        assert_eq!(
            ContentKind::classify(Some("Application/JSON; charset=UTF-8")),
            ContentKind::Json
        );
    }

    #[test]
    fn multipart_ignores_boundary() {
        assert_eq!(
            ContentKind::classify(Some(
                "multipart/form-data; boundary=----WebKitFormBoundaryoaY0xvjC2DBjmPRZ"
            )),
            ContentKind::Multipart
        );
        assert_eq!(
            ContentKind::classify(Some("multipart/mixed")),
            ContentKind::Multipart
        );
    }

    #[test]
    fn everything_else_reads_fields() {
        assert_eq!(
            ContentKind::classify(Some("text/plain")),
            ContentKind::Fields
        );
        assert_eq!(
            ContentKind::classify(Some("application/x-www-form-urlencoded")),
            ContentKind::Fields
        );
        assert_eq!(
            ContentKind::classify(Some("not a media type;;")),
            ContentKind::Fields
        );
    }

    #[test]
    fn detects_url_encoded_forms() {
        assert!(is_form_urlencoded(Some(
            "application/x-www-form-urlencoded; charset=UTF-8"
        )));
        assert!(!is_form_urlencoded(Some("text/plain")));
        assert!(!is_form_urlencoded(None));
    }
}
