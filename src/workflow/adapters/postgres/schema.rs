//! Diesel schema for workflow persistence.

diesel::table! {
    /// Employee records with soft-delete support.
    employees (id) {
        /// Employee identifier.
        id -> Uuid,
        /// Given name.
        #[max_length = 100]
        first_name -> Varchar,
        /// Family name.
        #[max_length = 100]
        last_name -> Varchar,
        /// Unique email address used as the caller lookup key.
        #[max_length = 255]
        email -> Varchar,
        /// Organisational role.
        #[max_length = 50]
        role -> Varchar,
        /// Soft-delete flag; deleted employees stay on disk but are
        /// invisible to directory lookup.
        deleted -> Bool,
    }
}

diesel::table! {
    /// Task records with their current workflow status.
    tasks (id) {
        /// Task identifier.
        id -> Uuid,
        /// Task title.
        #[max_length = 255]
        title -> Varchar,
        /// Task description.
        description -> Text,
        /// Task priority.
        #[max_length = 50]
        priority -> Varchar,
        /// Current workflow status.
        #[max_length = 50]
        status -> Varchar,
        /// Owning employee.
        assignee_id -> Uuid,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last mutation timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Append-only workflow audit entries.
    task_workflows (id) {
        /// Entry identifier.
        id -> Uuid,
        /// Task the entry belongs to.
        task_id -> Uuid,
        /// Status that was set.
        #[max_length = 50]
        status -> Varchar,
        /// Employee who performed the change.
        updated_by -> Uuid,
        /// When the change was recorded.
        recorded_at -> Timestamptz,
    }
}
