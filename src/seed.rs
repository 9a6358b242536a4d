//! Sample records the back-office starts with when no database is configured
//! (or the database is empty).

use chrono::{NaiveDate, NaiveDateTime};

use crate::models::{
    LocalizedText, Message, MessageStatus, Partner, Project, ProjectStatus, TeamMember,
    Testimonial,
};

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

fn datetime(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> NaiveDateTime {
    date(year, month, day)
        .and_hms_opt(hour, minute, 0)
        .unwrap_or_default()
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|item| item.to_string()).collect()
}

pub fn projects() -> Vec<Project> {
    vec![Project {
        id: 1,
        title: LocalizedText::new(
            "YOBIUM E-commerce Platform",
            "YOBIUM E-commerce Платформа",
            "YOBIUM E-commerce Platform",
        ),
        description: LocalizedText::new(
            "Zamonaviy e-commerce platformasi React va Node.js texnologiyalari bilan yaratilgan.",
            "Современная e-commerce платформа, созданная с использованием React и Node.js.",
            "Modern e-commerce platform built with React and Node.js technologies.",
        ),
        category: "E-commerce".to_string(),
        client: "YOBIUM LLC".to_string(),
        year: "2024".to_string(),
        duration: "6 oy".to_string(),
        team: "8 kishi".to_string(),
        status: ProjectStatus::Completed,
        technologies: strings(&["React", "Node.js", "MongoDB", "Redis", "AWS"]),
        image: "/placeholder.svg?height=200&width=300&text=YOBIUM".to_string(),
        created_at: date(2024, 1, 15),
    }]
}

pub fn team() -> Vec<TeamMember> {
    vec![TeamMember {
        id: 1,
        name: "Akmal Karimov".to_string(),
        role: LocalizedText::new(
            "Senior Full-Stack Developer",
            "Старший Full-Stack Разработчик",
            "Senior Full-Stack Developer",
        ),
        description: LocalizedText::new(
            "Full-stack development va cloud architecture bo'yicha ekspert. Enterprise loyihalar ustida ishlagan.",
            "Эксперт по full-stack разработке и облачной архитектуре. Работал над корпоративными проектами.",
            "Expert in full-stack development and cloud architecture. Worked on enterprise projects.",
        ),
        skills: strings(&["React", "Node.js", "Python", "AWS"]),
        experience: "5+ yil".to_string(),
        projects: "25+".to_string(),
        image: "/placeholder.svg?height=300&width=300&text=AK".to_string(),
        email: "akmal@ardentsoft.uz".to_string(),
        linkedin: "https://linkedin.com/in/akmal-karimov".to_string(),
        created_at: date(2024, 1, 1),
    }]
}

pub fn testimonials() -> Vec<Testimonial> {
    vec![Testimonial {
        id: 1,
        name: "Hamid Safarov".to_string(),
        role: LocalizedText::new("MUHANDIS", "ИНЖЕНЕР", "ENGINEER"),
        company: "TechCorp".to_string(),
        text: LocalizedText::new(
            "Juda yaxshi jamoa, ishonchli hamyonbop, va asosiysi o'z vaqtida bajarishadi! Loyihamiz kutilganidan ham yaxshi chiqdi.",
            "Очень хорошая команда, надежная и доступная, и главное выполняют в срок! Наш проект получился лучше ожидаемого.",
            "Very good team, reliable and affordable, and most importantly they deliver on time! Our project turned out better than expected.",
        ),
        rating: 5,
        image: "/placeholder.svg?height=80&width=80&text=HS".to_string(),
        created_at: date(2024, 1, 15),
    }]
}

pub fn partners() -> Vec<Partner> {
    vec![
        Partner {
            id: 1,
            name: "Microsoft".to_string(),
            logo: "/placeholder.svg?height=80&width=120&text=Microsoft".to_string(),
            website: "https://microsoft.com".to_string(),
            description: "Global technology company".to_string(),
            category: "Technology".to_string(),
            created_at: date(2024, 1, 1),
        },
        Partner {
            id: 2,
            name: "Google".to_string(),
            logo: "/placeholder.svg?height=80&width=120&text=Google".to_string(),
            website: "https://google.com".to_string(),
            description: "Search engine and cloud services".to_string(),
            category: "Technology".to_string(),
            created_at: date(2024, 1, 2),
        },
    ]
}

pub fn messages() -> Vec<Message> {
    vec![
        Message {
            id: 1,
            name: "Akmal Karimov".to_string(),
            email: "akmal@example.com".to_string(),
            phone: "+998901234567".to_string(),
            message: "Salom, bizning kompaniya uchun veb-sayt yaratish kerak. Batafsil ma'lumot olsam bo'ladimi?".to_string(),
            status: MessageStatus::New,
            created_at: datetime(2024, 7, 16, 10, 30),
        },
        Message {
            id: 2,
            name: "Nilufar Abdullayeva".to_string(),
            email: "nilufar@company.uz".to_string(),
            phone: "+998907654321".to_string(),
            message: "Mobil ilova ishlab chiqish xizmatingiz haqida ma'lumot kerak. Narxlar qanday?".to_string(),
            status: MessageStatus::Read,
            created_at: datetime(2024, 7, 15, 14, 20),
        },
    ]
}
