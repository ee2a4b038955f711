//! Demo contacts and tasks.

use chrono::{DateTime, Utc};
use taskboard::contact::domain::{Contact, ContactId};
use taskboard::task::domain::{AssigneeRef, Priority, SubTask, Task, TaskType};

const CONTACTS: [(&str, &str, &str); 10] = [
    ("0", "Anton Mayer", "anton@example.com"),
    ("1", "Anja Schulz", "schulz@example.com"),
    ("2", "Benedikt Ziegler", "benedikt@example.com"),
    ("3", "David Eisenberg", "davidberg@example.com"),
    ("4", "Eva Fischer", "eva@example.com"),
    ("5", "Emmanuel Mauer", "emmanuelma@example.com"),
    ("6", "Marcel Bauer", "bauer@example.com"),
    ("7", "Tatjana Wolf", "wolf@example.com"),
    ("8", "Sofia Lang", "sofia@example.com"),
    ("9", "Lukas Brandt", "lukas@example.com"),
];

struct DemoTask {
    title: &'static str,
    description: &'static str,
    category: &'static str,
    priority: Priority,
    task_type: TaskType,
    sub_tasks: &'static [(&'static str, bool)],
    assignees: &'static [&'static str],
}

// Contact "11" is not in the directory, so two cards show hidden assignees.
const TASKS: [DemoTask; 6] = [
    DemoTask {
        title: "Build the login component",
        description: "Implement a login component with validation.",
        category: "Technical Task",
        priority: Priority::Urgent,
        task_type: TaskType::ToDo,
        sub_tasks: &[
            ("HTML structure", true),
            ("Form validation", true),
            ("Wire up routing", false),
        ],
        assignees: &["0", "3", "5", "7"],
    },
    DemoTask {
        title: "Test user registration",
        description: "Check the sign-up flow on every device.",
        category: "User Story",
        priority: Priority::Medium,
        task_type: TaskType::InProgress,
        sub_tasks: &[
            ("Test on mobile", false),
            ("Test on tablet", false),
            ("Test on desktop", true),
        ],
        assignees: &["2", "5", "8"],
    },
    DemoTask {
        title: "Dark mode design review",
        description: "Collect feedback from the UX team.",
        category: "User Story",
        priority: Priority::Low,
        task_type: TaskType::Feedback,
        sub_tasks: &[("Analyse colour palette", true), ("Check accessibility", false)],
        assignees: &["2", "4", "11"],
    },
    DemoTask {
        title: "Build optimisation finished",
        description: "Bundle size reduced and build time halved.",
        category: "Technical Task",
        priority: Priority::Urgent,
        task_type: TaskType::Done,
        sub_tasks: &[
            ("Analyse bundler", true),
            ("Reduce chunks", true),
            ("Optimise assets", false),
        ],
        assignees: &["0", "1", "3", "4"],
    },
    DemoTask {
        title: "Implement the profile page",
        description: "Users can edit their details and avatar image.",
        category: "User Story",
        priority: Priority::Medium,
        task_type: TaskType::ToDo,
        sub_tasks: &[("Build form", true), ("Image upload", true), ("Live preview", true)],
        assignees: &["1", "7", "9"],
    },
    DemoTask {
        title: "Refactor services",
        description: "Split services into modules and unify their APIs.",
        category: "Technical Task",
        priority: Priority::Urgent,
        task_type: TaskType::InProgress,
        sub_tasks: &[
            ("AuthService", false),
            ("UserService", false),
            ("NotificationService", false),
        ],
        assignees: &["2", "4", "6", "9", "0", "11"],
    },
];

/// Returns the demo contact list.
pub fn contacts() -> Vec<Contact> {
    CONTACTS
        .iter()
        .filter_map(|&(id, name, mail)| {
            ContactId::new(id)
                .ok()
                .map(|contact_id| Contact::new(contact_id, name).with_mail(mail))
        })
        .collect()
}

/// Returns the demo tasks, all due at `due_date`.
pub fn tasks(due_date: DateTime<Utc>) -> Vec<Task> {
    TASKS
        .iter()
        .map(|demo| {
            Task::new(demo.title, due_date)
                .with_description(demo.description)
                .with_category(demo.category)
                .with_priority(demo.priority)
                .with_task_type(demo.task_type)
                .with_sub_tasks(
                    demo.sub_tasks
                        .iter()
                        .map(|&(text, is_checked)| SubTask::new(text).checked(is_checked)),
                )
                .with_assignees(
                    demo.assignees
                        .iter()
                        .filter_map(|&id| ContactId::new(id).ok().map(AssigneeRef::new)),
                )
        })
        .collect()
}
