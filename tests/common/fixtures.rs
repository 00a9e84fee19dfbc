//! Reusable env file content

/// Block comment, inline comment, a blank line and an `export` line
pub const SAMPLE_ENV: &str = "# Database host
DB_HOST=localhost
DB_PORT=5432 # default port

export API_KEY=secret
";

/// Member lines `SAMPLE_ENV` renders to with default options
pub const SAMPLE_MEMBERS: &[&str] = &[
    "    DB_HOST?: string;",
    "    DB_PORT?: string;",
    "    API_KEY?: string;",
];

/// Fallback source used when `.env` is absent
pub const EXAMPLE_ENV: &str = "PORT=3000\n";
