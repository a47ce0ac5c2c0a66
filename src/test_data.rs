#[cfg(test)]
pub const POST_MD_2021: &str = r#"---
title: 'Two Forms of Pre-rendering'
date: '2021-01-01'
tags: 'rendering'
---

Next.js has two forms of pre-rendering: **Static Generation** and **Server-side Rendering**. The difference is in **when** it generates the HTML for a page.

- **Static Generation** is the pre-rendering method that generates the HTML at **build time**. The pre-rendered HTML is then _reused_ on each request.
- **Server-side Rendering** is the pre-rendering method that generates the HTML on **each request**.

Importantly, Next.js lets you **choose** which pre-rendering form to use for each page.
"#;

#[cfg(test)]
pub const POST_MD_2022: &str = r#"---
title: 'When to Use Static Generation v.s. Server-side Rendering'
date: '2022-06-01'
tags:
  - rendering
  - nextjs
---

We recommend using **Static Generation** (with and without data) whenever possible because your page can be built once and served by CDN, which makes it much faster than having a server render the page on every request.

## When your data changes often

You can use Static Generation for many types of pages, but you should ask yourself: "Can I pre-render this page **ahead** of a user's request?" If the answer is yes, then you should choose Static Generation.
"#;

#[cfg(test)]
pub const POST_MD_STRING_TAGS: &str = r#"---
title: 'Tags in one string'
date: '2021-05-10'
tags: 'rendering react'
---

A legacy post whose tags were written as one space-separated string.
"#;

#[cfg(test)]
pub const POST_MD_BAD_DATE: &str = r#"---
title: 'A post with a broken date'
date: 'June 2022'
---

The date above is not sortable.
"#;

#[cfg(test)]
pub const POSTS_JSON: &str = r#"[
  { "id": 7, "title": "Cherry", "date": "2021-01-01", "tags": ["fruit", "red"] },
  { "id": "3", "title": "Banana", "date": "2022-06-01", "tags": "fruit" },
  { "id": "2", "title": "Apple", "date": "2021-01-01", "tags": ["fruit"] }
]"#;

#[cfg(test)]
pub const POSTS_JSON_SAME_DATE: &str = r#"[
  { "id": "b-banana", "title": "Banana", "date": "2022-06-01", "tags": [] },
  { "id": "a-apple", "title": "Apple", "date": "2022-06-01", "tags": [] }
]"#;

#[cfg(test)]
pub const POSTS_JSON_MISSING_TITLE: &str = r#"[
  { "id": "1", "title": "Fine", "date": "2021-01-01", "tags": [] },
  { "id": "5", "date": "2021-02-01", "tags": [] }
]"#;

#[cfg(test)]
pub const FIRESTORE_DOC: &str = r#"{
  "name": "projects/my-blog/databases/(default)/documents/posts/ssg-ssr",
  "fields": {
    "title": { "stringValue": "When to Use Static Generation v.s. Server-side Rendering" },
    "date": { "stringValue": "2022-06-01" },
    "tags": {
      "arrayValue": {
        "values": [
          { "stringValue": "rendering" },
          { "stringValue": "nextjs" }
        ]
      }
    },
    "contentHtml": { "stringValue": "<p>We recommend using <strong>Static Generation</strong>.</p>" }
  },
  "createTime": "2022-06-01T10:00:00.000000Z",
  "updateTime": "2022-06-01T10:00:00.000000Z"
}"#;

#[cfg(test)]
pub const FIRESTORE_DOC_STRING_TAGS: &str = r#"{
  "name": "projects/my-blog/databases/(default)/documents/posts/legacy",
  "fields": {
    "title": { "stringValue": "A legacy document" },
    "date": { "stringValue": "2021-03-04" },
    "tags": { "stringValue": "loser" },
    "contentHtml": { "stringValue": "<p>old</p>" }
  }
}"#;

#[cfg(test)]
pub const FIRESTORE_LIST: &str = r#"{
  "documents": [
    {
      "name": "projects/my-blog/databases/(default)/documents/posts/pre-rendering",
      "fields": {
        "title": { "stringValue": "Two Forms of Pre-rendering" },
        "date": { "stringValue": "2021-01-01" },
        "tags": { "arrayValue": { "values": [ { "stringValue": "rendering" } ] } }
      }
    },
    {
      "name": "projects/my-blog/databases/(default)/documents/posts/ssg-ssr",
      "fields": {
        "title": { "stringValue": "When to Use Static Generation v.s. Server-side Rendering" },
        "date": { "stringValue": "2022-06-01" },
        "tags": { "arrayValue": { "values": [ { "stringValue": "rendering" }, { "stringValue": "nextjs" } ] } }
      }
    }
  ]
}"#;
