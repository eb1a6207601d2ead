//! Diesel schema for task persistence.

diesel::table! {
    /// Task records.
    tasks (id) {
        /// Task identifier.
        id -> Uuid,
        /// Display text.
        text -> Text,
        /// Completion flag.
        completed -> Bool,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Insertion position used to order tasks sharing a timestamp.
        insertion_seq -> Int8,
    }
}
