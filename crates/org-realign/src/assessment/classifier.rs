use super::domain::AssessmentResponse;

/// Decides whether a response belongs to a scoring domain described by keywords.
pub trait DomainClassifier: Send + Sync {
    fn matches(&self, response: &AssessmentResponse, keywords: &[&str]) -> bool;

    /// Stable filter over `responses`; an empty result is valid.
    fn select<'a>(
        &self,
        responses: &'a [AssessmentResponse],
        keywords: &[&str],
    ) -> Vec<&'a AssessmentResponse> {
        responses
            .iter()
            .filter(|response| self.matches(response, keywords))
            .collect()
    }
}

fn contains_any(haystack: &str, keywords: &[&str]) -> bool {
    let haystack = haystack.to_lowercase();
    keywords
        .iter()
        .any(|keyword| haystack.contains(&keyword.to_lowercase()))
}

/// Case-insensitive substring match against prompt, section, domain, and tags.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeywordClassifier;

impl DomainClassifier for KeywordClassifier {
    fn matches(&self, response: &AssessmentResponse, keywords: &[&str]) -> bool {
        contains_any(&response.prompt, keywords)
            || response
                .section
                .as_deref()
                .is_some_and(|section| contains_any(section, keywords))
            || response
                .domain
                .as_deref()
                .is_some_and(|domain| contains_any(domain, keywords))
            || response.tags.iter().any(|tag| contains_any(tag, keywords))
    }
}

/// Exact tag membership only; prompts and sections are ignored.
#[derive(Debug, Clone, Copy, Default)]
pub struct TagClassifier;

impl DomainClassifier for TagClassifier {
    fn matches(&self, response: &AssessmentResponse, keywords: &[&str]) -> bool {
        keywords.iter().any(|keyword| response.has_tag(keyword))
    }
}

/// Matches when the declared `domain` equals a keyword or the section mentions one.
#[derive(Debug, Clone, Copy, Default)]
pub struct DomainFieldClassifier;

impl DomainClassifier for DomainFieldClassifier {
    fn matches(&self, response: &AssessmentResponse, keywords: &[&str]) -> bool {
        let domain_hit = response.domain.as_deref().is_some_and(|domain| {
            keywords
                .iter()
                .any(|keyword| domain.trim().eq_ignore_ascii_case(keyword))
        });
        domain_hit
            || response
                .section
                .as_deref()
                .is_some_and(|section| contains_any(section, keywords))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assessment::domain::ResponseValue;

    fn responses() -> Vec<AssessmentResponse> {
        vec![
            AssessmentResponse::new(
                "q1",
                "Our Reporting lines are clear",
                ResponseValue::Numeric(4.0),
            ),
            AssessmentResponse::new("q2", "Budget is adequate", ResponseValue::Numeric(3.0))
                .with_section("Resources"),
            AssessmentResponse::new("q3", "Open answer", ResponseValue::Numeric(2.0))
                .with_tags(["innovation"]),
            AssessmentResponse::new("q4", "Anything else", ResponseValue::Numeric(5.0))
                .with_domain("ethics"),
        ]
    }

    #[test]
    fn keyword_classifier_checks_every_text_field() {
        let responses = responses();
        let ids = |keywords: &[&str]| -> Vec<String> {
            KeywordClassifier
                .select(&responses, keywords)
                .into_iter()
                .map(|response| response.question_id.clone())
                .collect()
        };

        assert_eq!(ids(&["reporting"]), vec!["q1"]);
        assert_eq!(ids(&["RESOURCE"]), vec!["q2"]);
        assert_eq!(ids(&["innov", "report"]), vec!["q1", "q3"]);
        assert_eq!(ids(&["ethic"]), vec!["q4"]);
        assert!(ids(&["nothing matches"]).is_empty());
    }

    #[test]
    fn tag_classifier_requires_exact_tags() {
        let responses = responses();
        assert_eq!(TagClassifier.select(&responses, &["innovation"]).len(), 1);
        assert!(TagClassifier.select(&responses, &["innov"]).is_empty());
        assert!(TagClassifier.select(&responses, &["reporting"]).is_empty());
    }

    #[test]
    fn domain_field_classifier_uses_domain_and_section() {
        let responses = responses();
        let hits = DomainFieldClassifier.select(&responses, &["ethics", "resource"]);
        let ids: Vec<&str> = hits.iter().map(|r| r.question_id.as_str()).collect();
        assert_eq!(ids, vec!["q2", "q4"]);
    }
}
