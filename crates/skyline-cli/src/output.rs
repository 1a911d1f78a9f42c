//! Terminal rendering of client results.
//!
//! Records go to stdout as JSON so they can be piped; status lines are
//! colored and meant for people.

use colored::Colorize;

use skyline::{Feed, ReplyRef, Resource, ServiceUrl, Session};

fn done(what: &str) {
    println!("{} {}", "✓".green(), what);
}

fn labeled(label: &str, value: &str) {
    println!("{}: {}", label.dimmed(), value);
}

/// A single record or profile, pretty-printed.
pub fn resource(resource: &Resource) {
    println!("{resource:#}");
}

/// One compact JSON line per post, in feed order.
pub fn feed(feed: &Feed) {
    for post in feed {
        println!("{post}");
    }
}

/// Identity of a fresh session. Tokens are never printed.
pub fn session(session: &Session, pds: &ServiceUrl) -> skyline::Result<()> {
    match session.handle() {
        Some(handle) => done(&format!("Logged in as {}", handle.bold())),
        None => done("Logged in"),
    }
    labeled("DID", session.did()?);
    labeled("PDS", pds.as_str());
    Ok(())
}

pub fn posted(post_type: &str) {
    done(&format!("Posted {post_type} record"));
}

/// Where a reply landed in its thread.
pub fn replied(refs: &ReplyRef) {
    done("Replied");
    labeled("Parent", &refs.parent.uri);
    if !refs.is_top_level() {
        labeled("Root", &refs.root.uri);
    }
}
