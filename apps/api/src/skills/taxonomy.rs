//! Master skill taxonomy used for README mining.
//!
//! The category slices are fixed data, not configuration. Some names repeat
//! across categories (e.g. "JavaScript", "Firebase") — mining deduplicates,
//! so the overlap is harmless. Composition order matters: mined terms are
//! appended in taxonomy order to keep evidence output deterministic.

pub const PROGRAMMING_LANGUAGES: &[&str] = &[
    "Python", "Java", "C", "C++", "C#", "Go", "Rust", "Kotlin", "Swift",
    "JavaScript", "TypeScript", "Ruby", "PHP", "R", "MATLAB", "Scala",
    "Dart", "Perl", "Haskell", "Lua", "Groovy", "Objective-C",
    "Assembly", "Bash", "Shell", "PowerShell", "Julia", "Nim",
    "Elixir", "F#", "COBOL", "Fortran", "Solidity", "VHDL", "Verilog",
];

pub const WEB_TECH: &[&str] = &[
    "HTML", "HTML5", "CSS", "CSS3", "JavaScript", "TypeScript",
    "WebSockets", "WebRTC", "PWA", "Service Workers",
    "REST", "REST API", "SOAP", "GraphQL", "gRPC",
    "AJAX", "JSON", "XML", "YAML",
];

pub const FRONTEND: &[&str] = &[
    "React", "ReactJS", "Next.js", "Vue", "Vue.js", "Nuxt.js",
    "Angular", "Svelte", "SolidJS",
    "Redux", "Zustand", "MobX", "Recoil",
    "Tailwind CSS", "Bootstrap", "Material UI", "Ant Design",
    "Chakra UI", "ShadCN", "Framer Motion", "Three.js", "D3.js",
];

pub const BACKEND: &[&str] = &[
    "Node.js", "Express.js", "NestJS",
    "Django", "Flask", "FastAPI",
    "Spring", "Spring Boot", "Spring MVC",
    "ASP.NET", ".NET Core",
    "Ruby on Rails", "Laravel", "Symfony",
    "Phoenix", "Ktor", "Gin", "Fiber",
];

pub const DATABASES: &[&str] = &[
    "MySQL", "PostgreSQL", "SQLite", "Oracle", "SQL Server", "MariaDB",
    "MongoDB", "Cassandra", "CouchDB", "Firebase",
    "Redis", "Memcached",
    "Neo4j", "ArangoDB", "DynamoDB",
    "InfluxDB", "TimescaleDB",
];

pub const CLOUD: &[&str] = &[
    "AWS", "Amazon Web Services", "EC2", "S3", "Lambda", "RDS", "DynamoDB",
    "GCP", "Google Cloud Platform", "BigQuery", "Cloud Functions",
    "Azure", "Azure DevOps", "Azure Functions",
    "Firebase", "Supabase", "Vercel", "Netlify", "DigitalOcean", "Heroku",
];

pub const DEVOPS: &[&str] = &[
    "Docker", "Docker Compose", "Kubernetes", "Helm",
    "Terraform", "Pulumi", "Ansible", "Chef", "Puppet",
    "CI/CD", "GitHub Actions", "GitLab CI", "Jenkins", "CircleCI",
    "Nginx", "Apache", "HAProxy",
    "Linux", "Ubuntu", "Debian", "CentOS", "RedHat",
];

pub const AI_ML: &[&str] = &[
    "Machine Learning", "Deep Learning", "Artificial Intelligence",
    "Supervised Learning", "Unsupervised Learning", "Reinforcement Learning",
    "Neural Networks", "CNN", "RNN", "LSTM", "Transformers",
    "TensorFlow", "Keras", "PyTorch", "JAX",
    "Scikit-learn", "XGBoost", "LightGBM", "CatBoost",
    "OpenCV", "YOLO", "MediaPipe",
    "NLP", "LLM", "BERT", "GPT", "LangChain",
    "Pandas", "NumPy", "Matplotlib", "Seaborn",
];

pub const MOBILE: &[&str] = &[
    "Android", "Android Studio", "Jetpack Compose", "Kotlin",
    "iOS", "SwiftUI", "Xcode",
    "React Native", "Flutter", "Expo",
    "Ionic", "Cordova",
];

pub const SECURITY: &[&str] = &[
    "Cyber Security", "Ethical Hacking", "Penetration Testing",
    "OWASP", "OWASP Top 10",
    "SQL Injection", "XSS", "CSRF",
    "Encryption", "Decryption", "AES", "RSA",
    "JWT", "OAuth", "SAML",
    "Firewalls", "IDS", "IPS", "SIEM",
];

pub const BIG_DATA: &[&str] = &[
    "Hadoop", "Spark", "Kafka", "Flink",
    "Hive", "Pig", "HBase",
    "Airflow", "Luigi", "DBT",
    "ETL", "Data Warehouse", "Data Lake",
];

pub const TESTING: &[&str] = &[
    "Unit Testing", "Integration Testing", "System Testing",
    "JUnit", "PyTest", "Mocha", "Chai", "Jest",
    "Selenium", "Cypress", "Playwright",
    "Postman", "SoapUI",
];

pub const GRAPHICS: &[&str] = &[
    "Unity", "Unreal Engine", "Godot",
    "OpenGL", "Vulkan", "DirectX",
    "AR", "VR", "XR", "Blender",
];

pub const TOOLS: &[&str] = &[
    "Git", "GitHub", "GitLab", "Bitbucket",
    "Jira", "Confluence", "Notion",
    "Slack", "Trello",
];

pub const EMERGING: &[&str] = &[
    "Blockchain", "Web3", "Smart Contracts", "DeFi", "NFT",
    "IoT", "Edge Computing",
    "Quantum Computing",
    "Microservices", "Monolithic Architecture",
    "Event-Driven Architecture", "SOA",
    "Serverless", "API Gateway",
];

/// All taxonomy terms in category order. Callers that mutate or collect can
/// do so; mining iterates lazily.
pub fn master_skills() -> impl Iterator<Item = &'static str> {
    PROGRAMMING_LANGUAGES
        .iter()
        .chain(WEB_TECH)
        .chain(FRONTEND)
        .chain(BACKEND)
        .chain(DATABASES)
        .chain(CLOUD)
        .chain(DEVOPS)
        .chain(AI_ML)
        .chain(MOBILE)
        .chain(SECURITY)
        .chain(BIG_DATA)
        .chain(TESTING)
        .chain(GRAPHICS)
        .chain(TOOLS)
        .chain(EMERGING)
        .copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_master_list_is_nonempty_and_ordered() {
        let all: Vec<&str> = master_skills().collect();
        assert!(all.len() > 200);
        // Category order: languages come before emerging tech.
        let rust_pos = all.iter().position(|s| *s == "Rust").unwrap();
        let web3_pos = all.iter().position(|s| *s == "Web3").unwrap();
        assert!(rust_pos < web3_pos);
    }

    #[test]
    fn test_known_cross_category_duplicates_exist() {
        // "JavaScript" is listed under both languages and web tech; mining
        // must dedup, so the raw list legitimately repeats it.
        let count = master_skills().filter(|s| *s == "JavaScript").count();
        assert_eq!(count, 2);
    }
}
