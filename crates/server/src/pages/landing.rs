use shared::domain::{Organization, ORGANIZATION, SERVICES};
use url::Url;

use super::{document, escape_html};

/// Landing page sections in rendering order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Header,
    Hero,
    Tech,
    Portfolio,
    Offerings,
    Team,
    Faq,
    Blog,
    Cta,
}

pub const LANDING_SECTIONS: [Section; 9] = [
    Section::Header,
    Section::Hero,
    Section::Tech,
    Section::Portfolio,
    Section::Offerings,
    Section::Team,
    Section::Faq,
    Section::Blog,
    Section::Cta,
];

const TECH_STACK: [&str; 6] = [
    "Rust",
    "Python",
    "TypeScript",
    "PostgreSQL",
    "OpenAI API",
    "Telegram Bot API",
];

const PORTFOLIO: [(&str, &str); 3] = [
    ("Ассистент поддержки", "ИИ-агент, закрывающий типовые обращения клиентов круглосуточно."),
    ("Торговый бот", "Автоматическое исполнение стратегий с контролем рисков."),
    ("Корпоративный сайт", "Быстрый лендинг с формой заявки и аналитикой."),
];

const TEAM: [(&str, &str); 3] = [
    ("Алексей", "ML-инженер"),
    ("Мария", "Backend-разработчик"),
    ("Дмитрий", "Frontend и дизайн"),
];

const FAQ: [(&str, &str); 3] = [
    (
        "Сколько стоит проект?",
        "Стоимость зависит от задачи. Опишите проект в заявке, и мы подготовим оценку.",
    ),
    ("Как быстро вы начинаете?", "Обычно в течение недели после согласования требований."),
    ("Вы поддерживаете проект после запуска?", "Да, берём на сопровождение и развитие."),
];

const BLOG: [(&str, &str); 2] = [
    ("Как выбрать задачу для ИИ-агента", "/#blog"),
    ("Чат-бот или сайт: с чего начать", "/#blog"),
];

impl Section {
    pub fn id(self) -> &'static str {
        match self {
            Section::Header => "header",
            Section::Hero => "about",
            Section::Tech => "tech",
            Section::Portfolio => "portfolio",
            Section::Offerings => "offerings",
            Section::Team => "team",
            Section::Faq => "faq",
            Section::Blog => "blog",
            Section::Cta => "cta",
        }
    }

    pub fn render(self) -> String {
        let id = self.id();
        match self {
            Section::Header => format!(
                "<header id=\"{id}\" class=\"site-header\"><a href=\"/\"><strong>{}</strong></a><nav>\
                 <a href=\"/#tech\">Технологии</a><a href=\"/#portfolio\">Проекты</a>\
                 <a href=\"/#faq\">FAQ</a><a class=\"button\" href=\"/order\">Заказать</a></nav></header>",
                escape_html(ORGANIZATION.name)
            ),
            Section::Hero => format!(
                "<section id=\"{id}\"><div class=\"container\"><h1>{}</h1>\
                 <p>Разрабатываем сайты, чат-ботов и ИИ-агентов под задачи бизнеса.</p>\
                 <a class=\"button\" href=\"/order\">Обсудить проект</a></div></section>",
                escape_html(ORGANIZATION.name)
            ),
            Section::Tech => section_with_grid(
                id,
                "Технологии",
                TECH_STACK.iter().map(|tech| card(tech, "")).collect(),
            ),
            Section::Portfolio => section_with_grid(
                id,
                "Проекты",
                PORTFOLIO
                    .iter()
                    .map(|(title, text)| card(title, text))
                    .collect(),
            ),
            Section::Offerings => section_with_grid(
                id,
                "Услуги",
                SERVICES.iter().map(|service| card(service, "")).collect(),
            ),
            Section::Team => section_with_grid(
                id,
                "Команда",
                TEAM.iter().map(|(name, role)| card(name, role)).collect(),
            ),
            Section::Faq => {
                let items: String = FAQ
                    .iter()
                    .map(|(question, answer)| {
                        format!(
                            "<details><summary>{}</summary><p>{}</p></details>",
                            escape_html(question),
                            escape_html(answer)
                        )
                    })
                    .collect();
                format!(
                    "<section id=\"{id}\"><div class=\"container\"><h2>FAQ</h2>{items}</div></section>"
                )
            }
            Section::Blog => {
                let items: String = BLOG
                    .iter()
                    .map(|(title, href)| {
                        format!(
                            "<li><a href=\"{}\">{}</a></li>",
                            escape_html(href),
                            escape_html(title)
                        )
                    })
                    .collect();
                format!(
                    "<section id=\"{id}\"><div class=\"container\"><h2>Блог</h2><ul>{items}</ul></div></section>"
                )
            }
            Section::Cta => format!(
                "<section id=\"{id}\"><div class=\"container\"><h2>Есть идея?</h2>\
                 <p>Расскажите о задаче, и мы предложим решение.</p>\
                 <a class=\"button\" href=\"/order\">заказать проект</a></div></section>"
            ),
        }
    }
}

fn card(title: &str, text: &str) -> String {
    if text.is_empty() {
        return format!("<div class=\"card\"><h3>{}</h3></div>", escape_html(title));
    }
    format!(
        "<div class=\"card\"><h3>{}</h3><p>{}</p></div>",
        escape_html(title),
        escape_html(text)
    )
}

fn section_with_grid(id: &str, heading: &str, cards: String) -> String {
    format!(
        "<section id=\"{id}\"><div class=\"container\"><h2>{}</h2><div class=\"grid\">{cards}</div></div></section>",
        escape_html(heading)
    )
}

/// JSON-LD script element for `org`. `</` is escaped so the payload cannot
/// close the script element early.
pub fn organization_script(org: &Organization) -> String {
    let json = org.json_ld().to_string().replace("</", "<\\/");
    format!("<script type=\"application/ld+json\">{json}</script>")
}

pub fn render_landing(public_url: Option<&Url>) -> String {
    let head = public_url
        .map(|url| format!("<link rel=\"canonical\" href=\"{}\">\n", escape_html(url.as_str())))
        .unwrap_or_default();

    let mut body = String::from("<div class=\"page\">\n");
    for section in LANDING_SECTIONS {
        if section == Section::Hero {
            body.push_str("<main>\n");
        }
        body.push_str(&section.render());
        body.push('\n');
    }
    body.push_str("</main>\n");
    body.push_str(&organization_script(&ORGANIZATION));
    body.push_str("\n</div>");

    document(ORGANIZATION.name, &head, &body)
}
