use shared::{
    domain::{ContactMethod, DESCRIPTION_MAX, NAME_MAX, PRIVACY_POLICY_PATH, SERVICES},
    order::OrderForm,
    protocol::{CharCounter, Notice},
};

use super::{document, escape_html, render_notices};

fn counter(value: &str, max: usize) -> String {
    let counter = CharCounter::new(value, max);
    let class = if counter.at_limit {
        "counter at-limit"
    } else {
        "counter"
    };
    format!("<span class=\"{class}\">{}/{}</span>", counter.len, counter.max)
}

fn service_chips(form: &OrderForm) -> String {
    SERVICES
        .iter()
        .enumerate()
        .map(|(index, label)| {
            let selected = form.services().contains(&index);
            format!(
                "<label class=\"chip{}\"><input type=\"checkbox\" name=\"service\" value=\"{index}\"{}><span>{}</span><span>+</span></label>",
                if selected { " selected" } else { "" },
                if selected { " checked" } else { "" },
                escape_html(label)
            )
        })
        .collect()
}

fn contact_choices(form: &OrderForm) -> String {
    ContactMethod::ALL
        .iter()
        .map(|method| {
            let selected = form.contact() == Some(*method);
            format!(
                "<label class=\"contact{}\"><input type=\"radio\" name=\"contact\" value=\"{}\"{}>{}</label>",
                if selected { " selected" } else { "" },
                method.id(),
                if selected { " checked" } else { "" },
                escape_html(method.label())
            )
        })
        .collect()
}

pub fn render_order_page(form: &OrderForm, notices: &[Notice]) -> String {
    let submit_label = if form.is_submitting() {
        "Отправляем…"
    } else {
        "отправить"
    };
    let body = format!(
        r##"<main>
<form class="order-form" method="post" action="/order">
<a class="back" href="/#about" aria-label="Вернуться в блок О нас">&#8599;</a>
<h1>заказать проект</h1>
<p>Выберите задачу и расскажите о своём проекте</p>
{notices}
<div class="chips">{chips}</div>
<div class="field">
<input required name="name" placeholder="Ваше имя" aria-label="Ваше имя" maxlength="{name_max}" value="{name}">
{name_counter}
</div>
<p>Удобный способ связи</p>
<div class="contacts">{contacts}</div>
<div class="field">
<input required type="tel" name="phone" placeholder="+7 (___) ___-__-__" aria-label="Телефон" value="{phone}">
</div>
<p>Расскажите в двух словах про ваш проект</p>
<div class="field">
<textarea name="description" placeholder="Короткое описание" aria-label="Описание" maxlength="{description_max}">{description}</textarea>
{description_counter}
</div>
<div class="field">
<input type="checkbox" id="agree" name="agree" value="on"{agree_checked}>
<label for="agree">я согласен с условиями <a href="{privacy}" download>политики конфиденциальности</a></label>
</div>
<button class="button" type="submit"{disabled}>{submit_label}</button>
</form>
</main>"##,
        notices = render_notices(notices),
        chips = service_chips(form),
        name_max = NAME_MAX,
        name = escape_html(form.name()),
        name_counter = counter(form.name(), NAME_MAX),
        contacts = contact_choices(form),
        phone = escape_html(&form.phone().formatted()),
        description_max = DESCRIPTION_MAX,
        description = escape_html(form.description()),
        description_counter = counter(form.description(), DESCRIPTION_MAX),
        agree_checked = if form.agree() { " checked" } else { "" },
        privacy = PRIVACY_POLICY_PATH,
        disabled = if form.is_submitting() { " disabled" } else { "" },
    );
    document("Заказать проект", "", &body)
}
