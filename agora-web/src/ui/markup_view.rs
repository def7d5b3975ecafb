use agora_client::markup::{Block, Inline};
use yew::prelude::*;

pub fn render_blocks(blocks: &[Block]) -> Html {
    html! {
        <div class="comment-body">
            { for blocks.iter().map(render_block) }
        </div>
    }
}

fn render_block(b: &Block) -> Html {
    match b {
        Block::Paragraph(content) => html! { <p class="mb-2">{ render_inlines(content) }</p> },
        Block::Heading { level, content } => {
            // h1 and h2 are taken by the page and discussion titles
            let tag = format!("h{}", (*level + 2).min(6));
            html! { <@{tag} class="mt-2">{ render_inlines(content) }</@> }
        }
        Block::BulletList(items) => html! {
            <ul>
                { for items.iter().map(|i| html! { <li>{ render_inlines(i) }</li> }) }
            </ul>
        },
        Block::OrderedList { start, items } => html! {
            <ol start={ start.to_string() }>
                { for items.iter().map(|i| html! { <li>{ render_inlines(i) }</li> }) }
            </ol>
        },
        Block::Quote(inner) => html! {
            <blockquote class="border-start border-3 ps-3 text-body-secondary">
                { for inner.iter().map(render_block) }
            </blockquote>
        },
        Block::Code { lang, text } => html! {
            <pre class="bg-body-tertiary p-2 rounded">
                <code class={ lang.as_ref().map(|l| format!("language-{l}")) }>{ text }</code>
            </pre>
        },
        Block::Rule => html! { <hr /> },
    }
}

fn render_inlines(inlines: &[Inline]) -> Html {
    inlines.iter().map(render_inline).collect()
}

fn render_inline(i: &Inline) -> Html {
    match i {
        Inline::Text(t) => html! { { t } },
        Inline::Strong(content) => html! { <strong>{ render_inlines(content) }</strong> },
        Inline::Emphasis(content) => html! { <em>{ render_inlines(content) }</em> },
        Inline::Code(c) => html! { <code>{ c }</code> },
        Inline::Link { label, url } => html! {
            <a href={ url.clone() } target="_blank" rel="noopener noreferrer nofollow">
                { render_inlines(label) }
            </a>
        },
        Inline::Image { alt, url } => html! {
            <img class="img-fluid rounded" src={ url.clone() } alt={ alt.clone() } loading="lazy" />
        },
        Inline::LineBreak => html! { <br /> },
    }
}
