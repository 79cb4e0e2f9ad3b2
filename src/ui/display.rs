use crate::constants::VECTOR_SAMPLE_LEN;
use crate::recruit::JobRecord;
use colored::*;

/// Separator line used for visual formatting
pub const SEPARATOR: &str = "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━";

/// Prints a section title between separator lines
pub fn display_header(title: &str) {
    println!("\n{}\n{}\n{}", SEPARATOR, title.blue().bold(), SEPARATOR);
}

pub fn subheader(title: &str) {
    println!("\n{}", title.bold());
}

pub fn success(message: &str) {
    println!("{} {}", "✓".green(), message.green());
}

pub fn failure(message: &str) {
    println!("{} {}", "✗".red(), message.red());
}

pub fn notice(message: &str) {
    println!("{} {}", "ℹ".cyan(), message.cyan());
}

/// Formats field/value rows as a two-column table.
pub fn render_table(rows: &[(&str, String)]) -> String {
    let width = rows
        .iter()
        .map(|(field, _)| field.chars().count())
        .chain(std::iter::once("Field".len()))
        .max()
        .unwrap_or_default();

    let mut out = format!("{:<width$}  {}\n", "Field", "Value", width = width);
    out.push_str(&format!("{}  {}\n", "─".repeat(width), "─".repeat(5)));
    for (field, value) in rows {
        out.push_str(&format!("{:<width$}  {}\n", field, value, width = width));
    }
    out
}

pub fn print_table(rows: &[(&str, String)]) {
    print!("{}", render_table(rows));
}

/// Rows shown after a successful fetch.
pub fn job_rows(job: &JobRecord) -> Vec<(&'static str, String)> {
    let salary = if job.salary.is_empty() {
        "Not specified".to_string()
    } else {
        format!("{}{}", job.currency, job.salary)
    };
    vec![
        ("Job ID", job.job_id.clone()),
        ("Requisition Number", job.requisition_number.clone()),
        ("Job Title", job.job_title.clone()),
        ("Posting Title", job.posting_title.clone()),
        ("Salary", salary),
        ("Status", job.status.clone()),
        ("Remote Job", if job.remote_job { "Yes" } else { "No" }.to_string()),
        ("Date Opened", job.date_opened.clone()),
        ("Target Date", job.target_date.clone()),
        ("Experience Required", job.work_experience.clone()),
        ("Positions", job.number_of_positions.clone()),
        ("Client", job.client_name.clone()),
        ("Account Manager", job.account_manager.clone()),
    ]
}

/// First components of a vector, rounded to four decimals.
pub fn vector_sample(vector: &[f32]) -> String {
    let values: Vec<String> = vector
        .iter()
        .take(VECTOR_SAMPLE_LEN)
        .map(|x| format!("{:.4}", x))
        .collect();
    format!("[{}]", values.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn job(salary: &str, currency: &str, remote: bool) -> JobRecord {
        JobRecord {
            job_id: "1".into(),
            requisition_number: "ZR_1_JOB".into(),
            job_title: "Engineer".into(),
            posting_title: "Engineer".into(),
            job_description: String::new(),
            salary: salary.into(),
            currency: currency.into(),
            status: "Open".into(),
            remote_job: remote,
            date_opened: String::new(),
            target_date: String::new(),
            work_experience: String::new(),
            number_of_positions: String::new(),
            client_name: String::new(),
            account_manager: String::new(),
        }
    }

    fn value<'a>(rows: &'a [(&'static str, String)], field: &str) -> &'a str {
        rows.iter()
            .find(|(f, _)| *f == field)
            .map(|(_, v)| v.as_str())
            .unwrap()
    }

    #[test]
    fn salary_is_prefixed_with_currency() {
        let rows = job_rows(&job("90000", "€", true));
        assert_eq!(value(&rows, "Salary"), "€90000");
        assert_eq!(value(&rows, "Remote Job"), "Yes");
    }

    #[test]
    fn missing_salary_reads_not_specified() {
        let rows = job_rows(&job("", "$", false));
        assert_eq!(value(&rows, "Salary"), "Not specified");
        assert_eq!(value(&rows, "Remote Job"), "No");
    }

    #[test]
    fn vector_sample_keeps_ten_rounded_values() {
        let vector: Vec<f32> = (0..20).map(|i| i as f32 / 3.0).collect();
        let sample = vector_sample(&vector);
        assert_eq!(sample.matches(", ").count(), 9);
        assert!(sample.starts_with("[0.0000, 0.3333, 0.6667"));
    }

    #[test]
    fn table_columns_are_aligned() {
        let table = render_table(&[("Job ID", "1".into()), ("Requisition Number", "R".into())]);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("Field              "));
        assert_eq!(lines[2], "Job ID              1");
        assert_eq!(lines[3], "Requisition Number  R");
    }
}
