mod localized;
mod message;
mod partner;
mod project;
mod settings;
mod team_member;
mod testimonial;

pub use localized::{Language, LocalizedText};
pub use message::{ContactForm, Message, MessageStatus};
pub use partner::{Partner, PartnerDraft};
pub use project::{PROJECT_CATEGORIES, Project, ProjectDraft, ProjectStatus};
pub use settings::SiteSettings;
pub use team_member::{TeamMember, TeamMemberDraft};
pub use testimonial::{Testimonial, TestimonialDraft};

/// Image URL served by the site's placeholder generator
pub fn placeholder_image(height: u32, width: u32, text: &str) -> String {
    format!("/placeholder.svg?height={}&width={}&text={}", height, width, text)
}

/// Split comma separated form input into trimmed, non-empty entries
pub fn parse_list(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

/// First character of a name, used as the text of avatar placeholders
pub(crate) fn initial(name: &str) -> String {
    name.chars().next().map(String::from).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parse_list_trims_and_drops_blanks() {
        assert_eq!(
            parse_list(" React, Node.js ,, AWS "),
            vec!["React".to_string(), "Node.js".to_string(), "AWS".to_string()]
        );
        assert!(parse_list("").is_empty());
    }

    #[test]
    fn placeholder_format() {
        assert_eq!(
            placeholder_image(80, 120, "Acme"),
            "/placeholder.svg?height=80&width=120&text=Acme"
        );
    }
}
