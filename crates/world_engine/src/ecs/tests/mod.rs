//! Integration tests running the registry end to end
