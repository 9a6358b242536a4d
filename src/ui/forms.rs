//! How each entity appears in the back-office: list rows and form fields.

use crate::models::{
    ContactForm, Language, LocalizedText, Message, PROJECT_CATEGORIES, Partner, PartnerDraft,
    Project, ProjectDraft, TeamMember, TeamMemberDraft, Testimonial, TestimonialDraft, parse_list,
};
use crate::store::Entity;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    /// Cycled with Left/Right instead of typed
    Choice(&'static [&'static str]),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormField {
    pub key: &'static str,
    pub label: &'static str,
    pub value: String,
    pub kind: FieldKind,
}

impl FormField {
    fn text(key: &'static str, label: &'static str, value: impl Into<String>) -> Self {
        Self {
            key,
            label,
            value: value.into(),
            kind: FieldKind::Text,
        }
    }

    fn choice(
        key: &'static str,
        label: &'static str,
        options: &'static [&'static str],
        value: impl Into<String>,
    ) -> Self {
        Self {
            key,
            label,
            value: value.into(),
            kind: FieldKind::Choice(options),
        }
    }

    /// Move a choice field to the neighbouring option
    pub fn cycle(&mut self, forward: bool) {
        let FieldKind::Choice(options) = self.kind else {
            return;
        };
        if options.is_empty() {
            return;
        }
        let len = options.len();
        let next = match options.iter().position(|o| *o == self.value) {
            Some(i) if forward => (i + 1) % len,
            Some(i) => (i + len - 1) % len,
            None => 0,
        };
        self.value = options[next].to_string();
    }
}

/// Look up a field value by key
pub fn value<'a>(fields: &'a [FormField], key: &str) -> &'a str {
    fields
        .iter()
        .find(|field| field.key == key)
        .map(|field| field.value.as_str())
        .unwrap_or("")
}

const TITLE_KEYS: [(&str, &str); 3] = [("title_uz", "Title (uz)"), ("title_ru", "Title (ru)"), ("title_en", "Title (en)")];
const DESCRIPTION_KEYS: [(&str, &str); 3] = [
    ("description_uz", "Description (uz)"),
    ("description_ru", "Description (ru)"),
    ("description_en", "Description (en)"),
];
const ROLE_KEYS: [(&str, &str); 3] = [("role_uz", "Role (uz)"), ("role_ru", "Role (ru)"), ("role_en", "Role (en)")];
const TEXT_KEYS: [(&str, &str); 3] = [("text_uz", "Text (uz)"), ("text_ru", "Text (ru)"), ("text_en", "Text (en)")];

fn localized_fields(keys: &[(&'static str, &'static str); 3], text: Option<&LocalizedText>) -> Vec<FormField> {
    keys.iter()
        .zip(Language::ALL)
        .map(|((key, label), language)| {
            FormField::text(key, label, text.map(|t| t.get(language)).unwrap_or(""))
        })
        .collect()
}

fn localized_value(fields: &[FormField], keys: &[(&'static str, &'static str); 3]) -> LocalizedText {
    let mut text = LocalizedText::default();
    for ((key, _), language) in keys.iter().zip(Language::ALL) {
        *text.get_mut(language) = value(fields, key).to_string();
    }
    text
}

/// An entity the back-office can list and edit
pub trait AdminEntity: Entity {
    /// Heading of the list screen
    const TITLE: &'static str;
    const SINGULAR: &'static str;
    /// Whether records are created and edited through the form wizard
    const EDITABLE: bool = true;

    fn row(&self) -> String;

    fn form_fields(existing: Option<&Self>) -> Vec<FormField>;

    fn draft_from_form(fields: &[FormField]) -> Self::Draft;
}

impl AdminEntity for Project {
    const TITLE: &'static str = "Projects";
    const SINGULAR: &'static str = "Project";

    fn row(&self) -> String {
        format!(
            "{} | {} | {} | {} | {}",
            self.title.uz, self.client, self.category, self.year, self.status
        )
    }

    fn form_fields(existing: Option<&Self>) -> Vec<FormField> {
        let mut fields = localized_fields(&TITLE_KEYS, existing.map(|p| &p.title));
        fields.extend(localized_fields(&DESCRIPTION_KEYS, existing.map(|p| &p.description)));
        fields.push(FormField::choice(
            "category",
            "Category",
            PROJECT_CATEGORIES,
            existing.map(|p| p.category.as_str()).unwrap_or(PROJECT_CATEGORIES[0]),
        ));
        fields.push(FormField::text("client", "Client", existing.map(|p| p.client.as_str()).unwrap_or("")));
        fields.push(FormField::text("year", "Year", existing.map(|p| p.year.as_str()).unwrap_or("")));
        fields.push(FormField::text("duration", "Duration", existing.map(|p| p.duration.as_str()).unwrap_or("")));
        fields.push(FormField::text("team", "Team", existing.map(|p| p.team.as_str()).unwrap_or("")));
        fields.push(FormField::choice(
            "status",
            "Status",
            &["inProgress", "completed"],
            existing.map(|p| p.status.as_str()).unwrap_or("inProgress"),
        ));
        fields.push(FormField::text(
            "technologies",
            "Technologies (comma separated)",
            existing.map(|p| p.technologies.join(", ")).unwrap_or_default(),
        ));
        fields.push(FormField::text("image", "Image URL", existing.map(|p| p.image.as_str()).unwrap_or("")));
        fields
    }

    fn draft_from_form(fields: &[FormField]) -> ProjectDraft {
        ProjectDraft {
            title: localized_value(fields, &TITLE_KEYS),
            description: localized_value(fields, &DESCRIPTION_KEYS),
            category: value(fields, "category").to_string(),
            client: value(fields, "client").to_string(),
            year: value(fields, "year").to_string(),
            duration: value(fields, "duration").to_string(),
            team: value(fields, "team").to_string(),
            status: value(fields, "status").parse().unwrap_or_default(),
            technologies: parse_list(value(fields, "technologies")),
            image: value(fields, "image").to_string(),
        }
    }
}

impl AdminEntity for TeamMember {
    const TITLE: &'static str = "Team";
    const SINGULAR: &'static str = "Team Member";

    fn row(&self) -> String {
        format!("{} | {} | {} | {}", self.name, self.role.uz, self.email, self.experience)
    }

    fn form_fields(existing: Option<&Self>) -> Vec<FormField> {
        let mut fields = vec![
            FormField::text("name", "Name", existing.map(|m| m.name.as_str()).unwrap_or("")),
            FormField::text("email", "Email", existing.map(|m| m.email.as_str()).unwrap_or("")),
        ];
        fields.extend(localized_fields(&ROLE_KEYS, existing.map(|m| &m.role)));
        fields.extend(localized_fields(&DESCRIPTION_KEYS, existing.map(|m| &m.description)));
        fields.push(FormField::text(
            "skills",
            "Skills (comma separated)",
            existing.map(|m| m.skills.join(", ")).unwrap_or_default(),
        ));
        fields.push(FormField::text("experience", "Experience", existing.map(|m| m.experience.as_str()).unwrap_or("")));
        fields.push(FormField::text("projects", "Projects", existing.map(|m| m.projects.as_str()).unwrap_or("")));
        fields.push(FormField::text("image", "Image URL", existing.map(|m| m.image.as_str()).unwrap_or("")));
        fields.push(FormField::text("linkedin", "LinkedIn", existing.map(|m| m.linkedin.as_str()).unwrap_or("")));
        fields
    }

    fn draft_from_form(fields: &[FormField]) -> TeamMemberDraft {
        TeamMemberDraft {
            name: value(fields, "name").to_string(),
            role: localized_value(fields, &ROLE_KEYS),
            description: localized_value(fields, &DESCRIPTION_KEYS),
            skills: parse_list(value(fields, "skills")),
            experience: value(fields, "experience").to_string(),
            projects: value(fields, "projects").to_string(),
            image: value(fields, "image").to_string(),
            email: value(fields, "email").to_string(),
            linkedin: value(fields, "linkedin").to_string(),
        }
    }
}

impl AdminEntity for Testimonial {
    const TITLE: &'static str = "Testimonials";
    const SINGULAR: &'static str = "Testimonial";

    fn row(&self) -> String {
        format!(
            "{} | {} | {}",
            self.name,
            self.company,
            "*".repeat(usize::from(self.rating.min(5)))
        )
    }

    fn form_fields(existing: Option<&Self>) -> Vec<FormField> {
        let mut fields = vec![
            FormField::text("name", "Name", existing.map(|t| t.name.as_str()).unwrap_or("")),
            FormField::text("company", "Company", existing.map(|t| t.company.as_str()).unwrap_or("")),
        ];
        fields.extend(localized_fields(&ROLE_KEYS, existing.map(|t| &t.role)));
        fields.extend(localized_fields(&TEXT_KEYS, existing.map(|t| &t.text)));
        fields.push(FormField::choice(
            "rating",
            "Rating",
            &["5", "4", "3", "2", "1"],
            existing.map(|t| t.rating.to_string()).unwrap_or_else(|| "5".to_string()),
        ));
        fields.push(FormField::text("image", "Image URL", existing.map(|t| t.image.as_str()).unwrap_or("")));
        fields
    }

    fn draft_from_form(fields: &[FormField]) -> TestimonialDraft {
        TestimonialDraft {
            name: value(fields, "name").to_string(),
            role: localized_value(fields, &ROLE_KEYS),
            company: value(fields, "company").to_string(),
            text: localized_value(fields, &TEXT_KEYS),
            rating: value(fields, "rating").parse().unwrap_or(5),
            image: value(fields, "image").to_string(),
        }
    }
}

impl AdminEntity for Partner {
    const TITLE: &'static str = "Partners";
    const SINGULAR: &'static str = "Partner";

    fn row(&self) -> String {
        format!("{} | {} | {}", self.name, self.category, self.website)
    }

    fn form_fields(existing: Option<&Self>) -> Vec<FormField> {
        vec![
            FormField::text("name", "Name", existing.map(|p| p.name.as_str()).unwrap_or("")),
            FormField::text("category", "Category", existing.map(|p| p.category.as_str()).unwrap_or("")),
            FormField::text("website", "Website", existing.map(|p| p.website.as_str()).unwrap_or("")),
            FormField::text("description", "Description", existing.map(|p| p.description.as_str()).unwrap_or("")),
            FormField::text("logo", "Logo URL", existing.map(|p| p.logo.as_str()).unwrap_or("")),
        ]
    }

    fn draft_from_form(fields: &[FormField]) -> PartnerDraft {
        PartnerDraft {
            name: value(fields, "name").to_string(),
            logo: value(fields, "logo").to_string(),
            website: value(fields, "website").to_string(),
            description: value(fields, "description").to_string(),
            category: value(fields, "category").to_string(),
        }
    }
}

impl AdminEntity for Message {
    const TITLE: &'static str = "Messages";
    const SINGULAR: &'static str = "Message";
    const EDITABLE: bool = false;

    fn row(&self) -> String {
        format!(
            "[{}] {} | {} | {}",
            self.status,
            self.name,
            self.email,
            self.created_at.format("%Y-%m-%d %H:%M")
        )
    }

    fn form_fields(existing: Option<&Self>) -> Vec<FormField> {
        vec![
            FormField::text("name", "Name", existing.map(|m| m.name.as_str()).unwrap_or("")),
            FormField::text("email", "Email", existing.map(|m| m.email.as_str()).unwrap_or("")),
            FormField::text("phone", "Phone", existing.map(|m| m.phone.as_str()).unwrap_or("")),
            FormField::text("message", "Message", existing.map(|m| m.message.as_str()).unwrap_or("")),
        ]
    }

    fn draft_from_form(fields: &[FormField]) -> ContactForm {
        ContactForm {
            name: value(fields, "name").to_string(),
            phone: value(fields, "phone").to_string(),
            email: value(fields, "email").to_string(),
            message: value(fields, "message").to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ProjectStatus;
    use crate::seed;
    use pretty_assertions::assert_eq;

    #[test]
    fn project_form_round_trips_existing_record() {
        let project = &seed::projects()[0];
        let fields = Project::form_fields(Some(project));
        assert_eq!(ProjectDraft::from(project), Project::draft_from_form(&fields));
    }

    #[test]
    fn new_project_form_defaults() {
        let fields = Project::form_fields(None);
        assert_eq!(value(&fields, "category"), "Web");
        assert_eq!(value(&fields, "status"), "inProgress");
        let draft = Project::draft_from_form(&fields);
        assert_eq!(draft.status, ProjectStatus::InProgress);
        assert!(draft.technologies.is_empty());
    }

    #[test]
    fn choice_fields_cycle_both_ways() {
        let mut fields = Project::form_fields(None);
        let status = fields.iter_mut().find(|f| f.key == "status").unwrap();
        status.cycle(true);
        assert_eq!(status.value, "completed");
        status.cycle(true);
        assert_eq!(status.value, "inProgress");
        status.cycle(false);
        assert_eq!(status.value, "completed");
    }

    #[test]
    fn text_fields_ignore_cycle() {
        let mut field = FormField::text("name", "Name", "Acme");
        field.cycle(true);
        assert_eq!(field.value, "Acme");
    }

    #[test]
    fn team_skills_are_split() {
        let mut fields = TeamMember::form_fields(None);
        for field in fields.iter_mut() {
            if field.key == "skills" {
                field.value = "Rust, Go ,".to_string();
            }
        }
        let draft = TeamMember::draft_from_form(&fields);
        assert_eq!(draft.skills, vec!["Rust".to_string(), "Go".to_string()]);
    }

    #[test]
    fn testimonial_rating_comes_from_choice() {
        let testimonial = &seed::testimonials()[0];
        let fields = Testimonial::form_fields(Some(testimonial));
        assert_eq!(Testimonial::draft_from_form(&fields).rating, 5);
        assert_eq!(testimonial.row(), "Hamid Safarov | TechCorp | *****");
    }
}
