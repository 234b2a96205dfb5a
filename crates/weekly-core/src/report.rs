use chrono::NaiveDate;

use crate::task::{classify, Bucket, Task};

/// The final weekly digest: a title plus three ordered entry lists.
///
/// Entry order is discovery order across projects and tasks, never
/// sorted. Built once per invocation and handed by value to the sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub title: String,
    pub last_week: Vec<String>,
    pub next_week: Vec<String>,
    pub blockers: Vec<String>,
}

impl Report {
    fn new(reference_date: NaiveDate) -> Self {
        Self {
            title: format!("Weekly Projects ({})", reference_date.format("%Y-%m-%d")),
            last_week: Vec::new(),
            next_week: Vec::new(),
            blockers: Vec::new(),
        }
    }

    fn record(&mut self, task: &Task, reference_date: NaiveDate) {
        let result = classify(task, reference_date);

        if let (Some(bucket), Some(due)) = (result.bucket, task.due_on) {
            let entry = format!("- {} (Due on: {})", task.name, due.format("%Y-%m-%d"));
            match bucket {
                Bucket::LastWeek => self.last_week.push(entry),
                Bucket::NextWeek => self.next_week.push(entry),
            }
        }

        // Blocked entries are independent of the time bucket, so a task
        // can legitimately appear in two lists.
        if result.blocked {
            if let Some(blocker) = &task.blocker {
                self.blockers
                    .push(format!("- {} (Blocker: {})", task.name, blocker));
            }
        }
    }

    /// Render the report body as markdown, with the three sections in
    /// fixed order. Empty sections render with no entries rather than
    /// being suppressed.
    #[must_use]
    pub fn body(&self) -> String {
        format!(
            "# {}\n\n## Last Week\n{}\n\n## Next Week\n{}\n\n## Blockers\n{}\n",
            self.title,
            self.last_week.join("\n"),
            self.next_week.join("\n"),
            self.blockers.join("\n"),
        )
    }

    /// True when no task landed in any list.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.last_week.is_empty() && self.next_week.is_empty() && self.blockers.is_empty()
    }
}

/// Build the digest for one invocation from all projects' tasks.
///
/// Projects are visited in caller-supplied order and tasks in provider
/// order, which fixes entry order deterministically. Pure: no I/O, no
/// clock access.
#[must_use]
pub fn aggregate(projects: &[Vec<Task>], reference_date: NaiveDate) -> Report {
    let mut report = Report::new(reference_date);
    for tasks in projects {
        for task in tasks {
            report.record(task, reference_date);
        }
    }
    report
}
