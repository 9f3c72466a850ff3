// Candidate storage: a repository abstraction over the list of uploaded resumes,
// plus the upload/list/delete route handlers.

pub mod handlers;
pub mod repository;
