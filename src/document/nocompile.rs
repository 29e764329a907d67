/*
** This file is a part of xmlnode (in-memory XML document model)
** Copyright (C) 2000-2025 Gurer Ozen
**
** xmlnode is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

/// # Must not compile tests
///
/// Returned Cursor cannot outlive the Document:
/// ```compile_fail
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// use std::str::FromStr;
/// use xmlnode::Document;
/// use xmlnode::Cursor;
/// let c: Cursor;
/// {
///     let doc = Document::from_str("<a><b/></a>")?;
///     c = doc.top();
/// }
/// println!("{}", c);
/// # Ok(())
/// # }
/// ```
///
/// Cursor copy cannot outlive the Document:
/// ```compile_fail
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// use std::str::FromStr;
/// use xmlnode::Document;
/// use xmlnode::Cursor;
/// let c2: Cursor;
/// {
///     let doc = Document::from_str("<a><b/></a>")?;
///     let c1 = doc.find_element("a").first_child_named("b");
///     c2 = c1;
/// }
/// println!("{}", c2);
/// # Ok(())
/// # }
/// ```
///
/// Document cannot be modified while a Cursor is alive:
/// ```compile_fail
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// use std::str::FromStr;
/// use xmlnode::Document;
/// let mut doc = Document::from_str("<a><b/></a>")?;
/// let b = doc.first_element().first_child();
/// doc.clear();
/// println!("{}", b);
/// # Ok(())
/// # }
/// ```
///
/// Returned names cannot outlive the Document:
/// ```compile_fail
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// use std::str::FromStr;
/// use xmlnode::Document;
/// let name: &str;
/// {
///     let doc = Document::from_str("<a/>")?;
///     name = doc.first_element().name();
/// }
/// println!("{}", name);
/// # Ok(())
/// # }
/// ```
///
#[cfg(doctest)]
struct MustNotCompileTests;
