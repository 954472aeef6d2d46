use crate::error::{MangaDlError, Result};
use crate::rulebook::Rule;
use regex::Regex;
use tracing::debug;

/// Infinite sequence of candidate page image URLs, derived from one sample
/// URL by splitting out its numbering token.
///
/// The sequence yields `prefix + zero_pad(i, trailing_zeros) + suffix` for
/// i = start, start+step, start+2*step, ... and never ends on its own; the
/// downloader decides when to stop consuming it.
#[derive(Debug, Clone)]
pub struct PageUrls {
    prefix: String,
    suffix: String,
    step: u64,
    width: usize,
    next: u64,
}

impl PageUrls {
    /// Decompose `sample_url` with the rule's numbering regex. The regex must
    /// contain exactly one capture group and match the URL exactly once;
    /// anything else would silently mis-parse, so it is rejected here.
    pub fn from_sample(sample_url: &str, rule: &Rule) -> Result<Self> {
        let regex = Regex::new(&rule.url_regex).map_err(|e| {
            MangaDlError::pattern_extraction(format!(
                "invalid url_regex {:?}: {}",
                rule.url_regex, e
            ))
        })?;

        // captures_len counts the implicit whole-match group.
        if regex.captures_len() != 2 {
            return Err(MangaDlError::pattern_extraction(format!(
                "url_regex {:?} must contain exactly one capture group",
                rule.url_regex
            )));
        }

        let mut matches = regex.captures_iter(sample_url);
        let captures = matches.next().ok_or_else(|| {
            MangaDlError::pattern_extraction(format!(
                "no numbering token in {:?}",
                sample_url
            ))
        })?;
        if matches.next().is_some() {
            return Err(MangaDlError::pattern_extraction(format!(
                "ambiguous numbering token in {:?}",
                sample_url
            )));
        }

        let token = captures.get(1).ok_or_else(|| {
            MangaDlError::pattern_extraction(format!(
                "url_regex {:?} matched without capturing",
                rule.url_regex
            ))
        })?;

        let start: u64 = token.as_str().parse().map_err(|_| {
            MangaDlError::pattern_extraction(format!(
                "numbering token {:?} is not numeric",
                token.as_str()
            ))
        })?;

        debug!(
            "page url pattern: prefix={:?} start={} step={} suffix={:?}",
            &sample_url[..token.start()],
            start,
            rule.step,
            &sample_url[token.end()..]
        );

        Ok(Self {
            prefix: sample_url[..token.start()].to_string(),
            suffix: sample_url[token.end()..].to_string(),
            step: rule.step,
            width: rule.trailing_zeros,
            next: start,
        })
    }
}

impl Iterator for PageUrls {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        let url = format!(
            "{}{:0width$}{}",
            self.prefix,
            self.next,
            self.suffix,
            width = self.width
        );
        self.next += self.step;
        Some(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(url_regex: &str, step: u64, trailing_zeros: usize) -> Rule {
        Rule {
            name_selector: String::new(),
            image_selector: String::new(),
            url_regex: url_regex.to_string(),
            step,
            trailing_zeros,
        }
    }

    #[test]
    fn steps_from_sample_with_padding() {
        let urls = PageUrls::from_sample("http://x/img045.jpg", &rule(r"([0-9]{3})\.jpg", 2, 3))
            .unwrap()
            .take(3)
            .collect::<Vec<_>>();
        assert_eq!(
            urls,
            vec![
                "http://x/img045.jpg",
                "http://x/img047.jpg",
                "http://x/img049.jpg",
            ]
        );
    }

    #[test]
    fn narrow_padding_grows_to_natural_width() {
        let urls = PageUrls::from_sample("http://x/p099.png", &rule(r"([0-9]{3})\.png", 1, 2))
            .unwrap()
            .take(2)
            .collect::<Vec<_>>();
        assert_eq!(urls, vec!["http://x/p99.png", "http://x/p100.png"]);
    }

    #[test]
    fn counter_outgrows_padding_without_truncation() {
        let urls = PageUrls::from_sample("http://x/999.jpg", &rule(r"([0-9]{3})\.jpg", 1, 3))
            .unwrap()
            .take(2)
            .collect::<Vec<_>>();
        assert_eq!(urls, vec!["http://x/999.jpg", "http://x/1000.jpg"]);
    }

    #[test]
    fn no_match_is_rejected() {
        let err = PageUrls::from_sample("http://x/cover.png", &rule(r"([0-9]{3})\.jpg", 1, 3))
            .unwrap_err();
        assert!(matches!(err, MangaDlError::PatternExtraction(_)));
    }

    #[test]
    fn multiple_matches_are_rejected() {
        let err = PageUrls::from_sample(
            "http://x/001.jpg/045.jpg",
            &rule(r"([0-9]{3})\.jpg", 1, 3),
        )
        .unwrap_err();
        assert!(matches!(err, MangaDlError::PatternExtraction(_)));
    }

    #[test]
    fn regex_without_capture_group_is_rejected() {
        let err =
            PageUrls::from_sample("http://x/img045.jpg", &rule(r"[0-9]{3}\.jpg", 1, 3)).unwrap_err();
        assert!(matches!(err, MangaDlError::PatternExtraction(_)));
    }

    #[test]
    fn invalid_regex_is_rejected() {
        let err = PageUrls::from_sample("http://x/img045.jpg", &rule(r"([0-9]{3", 1, 3)).unwrap_err();
        assert!(matches!(err, MangaDlError::PatternExtraction(_)));
    }
}
