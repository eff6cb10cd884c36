// Resume API: upload a PDF, get back (and keep) its structured record.

pub mod handlers;
