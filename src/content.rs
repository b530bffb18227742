pub const OWNER_NAME: &str = "Hariharan Elangovan";
pub const OWNER_TAGLINE: &str =
    "Aspiring Data Scientist specializing in machine learning, computer vision, and AI-driven solutions.";
pub const CONTACT_EMAIL: &str = "elahari16@gmail.com";

pub struct NavLink {
    pub label: &'static str,
    pub href: &'static str,
}

pub const NAV_LINKS: &[NavLink] = &[
    NavLink { label: "Home", href: "#hero" },
    NavLink { label: "About", href: "#about" },
    NavLink { label: "Skills", href: "#skills" },
    NavLink { label: "Projects", href: "#projects" },
    NavLink { label: "Experience", href: "#experience" },
    NavLink { label: "Certificates", href: "#certificates" },
    NavLink { label: "Leadership", href: "#leadership" },
    NavLink { label: "Contact", href: "#contact" },
];

pub const ABOUT_PARAGRAPHS: &[&str] = &[
    "I turn raw data into decisions, with a focus on machine learning and computer vision.",
    "Recent work spans toxic comment classification, workplace safety monitoring, and regression models shipped behind Flask APIs.",
    "Outside of models I care about clear dashboards and explaining results to the people who use them.",
];

pub struct SkillCategory {
    pub title: &'static str,
    pub skills: &'static [&'static str],
}

pub const SKILL_CATEGORIES: &[SkillCategory] = &[
    SkillCategory {
        title: "Programming & Tools",
        skills: &["Python", "SQL", "MySQL", "Pandas", "NumPy", "Scikit-learn", "TensorFlow", "PyTorch", "Flask"],
    },
    SkillCategory {
        title: "Data Visualization",
        skills: &["Power BI", "Tableau", "Matplotlib", "Seaborn", "Plotly", "Dashboard Design"],
    },
    SkillCategory {
        title: "ML/AI Concepts",
        skills: &["Supervised Learning", "Unsupervised Learning", "NLP", "Computer Vision", "Feature Engineering"],
    },
    SkillCategory {
        title: "Big Data & Cloud",
        skills: &["AWS EC2", "Hadoop", "Data Warehousing", "ETL Processes", "Git"],
    },
    SkillCategory {
        title: "Database Management",
        skills: &["SQL", "MySQL", "Database Design", "Query Optimization", "MongoDB"],
    },
    SkillCategory {
        title: "Soft Skills",
        skills: &["Critical Thinking", "Problem-Solving", "Effective Communication", "Leadership"],
    },
];

pub struct Project {
    pub title: &'static str,
    pub category: &'static str,
    pub description: &'static str,
    pub technologies: &'static [&'static str],
    pub link: &'static str,
}

pub const PROJECTS: &[Project] = &[
    Project {
        title: "Mini Social Media App with Toxic Comment Classification",
        category: "Machine Learning",
        description: "A small social app that flags toxic comments in real time with a logistic regression model behind a Flask API.",
        technologies: &["Python", "Flask", "Node.js", "MongoDB", "Scikit-learn"],
        link: "https://github.com/elahari16/social_media_comment_classification",
    },
    Project {
        title: "Workplace Activity Recognition System",
        category: "Computer Vision",
        description: "Real-time safety monitoring that detects unsafe activity with YOLO and raises alerts on protocol violations.",
        technologies: &["YOLO", "OpenCV", "TensorFlow", "Streamlit", "Roboflow"],
        link: "https://github.com/elahari16/workplace-safety-cv",
    },
    Project {
        title: "Medical Product Supply Chain System",
        category: "Web Development",
        description: "Inventory and distribution platform connecting medical suppliers with healthcare facilities, with order tracking.",
        technologies: &["PHP", "MySQL", "JavaScript", "Bootstrap", "jQuery"],
        link: "https://github.com/elahari16/medical-supply-chain",
    },
];

pub const ALL_CATEGORIES: &str = "All";

/// "All" followed by each project category once, in first-seen order.
pub fn project_categories() -> Vec<&'static str> {
    let mut categories = vec![ALL_CATEGORIES];
    for project in PROJECTS {
        if !categories.contains(&project.category) {
            categories.push(project.category);
        }
    }
    categories
}

pub struct Experience {
    pub role: &'static str,
    pub company: &'static str,
    pub location: &'static str,
    pub period: &'static str,
    pub highlights: &'static [&'static str],
}

pub const EXPERIENCE: &[Experience] = &[
    Experience {
        role: "Data Science Intern",
        company: "VCODEZ",
        location: "Chennai, India",
        period: "Mar 2025 - Present",
        highlights: &[
            "Building regression models for predictive analytics applications",
            "Deploying machine learning solutions using Flask",
        ],
    },
    Experience {
        role: "Data Science Intern",
        company: "360DigiTMG",
        location: "Chennai, India",
        period: "Jun 2024 - Mar 2025",
        highlights: &[
            "Developed YOLO and OpenCV models for workplace safety analytics",
            "Implemented image processing for real-time object detection",
        ],
    },
];

pub struct Certificate {
    pub title: &'static str,
    pub issuer: &'static str,
}

pub const CERTIFICATES: &[Certificate] = &[
    Certificate {
        title: "Diploma in Artificial Intelligence",
        issuer: "SUNY in association with the State University of New York, USA",
    },
    Certificate { title: "Python Programming", issuer: "360DigiTMG" },
    Certificate { title: "SQL Basics", issuer: "360DigiTMG" },
    Certificate { title: "Microsoft Power BI", issuer: "360DigiTMG" },
    Certificate { title: "Data Science & AI", issuer: "360DigiTMG" },
    Certificate { title: "Python for Data Science", issuer: "NPTEL" },
];

pub struct Role {
    pub title: &'static str,
    pub organization: &'static str,
    pub period: &'static str,
    pub summary: &'static str,
}

pub const LEADERSHIP: &[Role] = &[
    Role {
        title: "Student Vice President",
        organization: "Department of IT",
        period: "2023 - 2024",
        summary: "Represented the student body and coordinated departmental events and workshops.",
    },
    Role {
        title: "NSS Coordinator",
        organization: "National Service Scheme",
        period: "2022 - 2023",
        summary: "Led blood donation camps, campus clean-up drives, and community outreach.",
    },
];

pub struct SocialLink {
    pub label: &'static str,
    pub href: &'static str,
}

pub const SOCIAL_LINKS: &[SocialLink] = &[
    SocialLink { label: "GitHub", href: "https://github.com/elahari16" },
    SocialLink {
        label: "LinkedIn",
        href: "https://www.linkedin.com/in/hariharan-elangovan-b0162a23b/",
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn categories_start_with_all_and_are_unique() {
        let categories = project_categories();

        assert_eq!(categories.first(), Some(&ALL_CATEGORIES));
        assert_eq!(categories.len(), 1 + 3);
        assert!(categories.contains(&"Computer Vision"));
    }
}
