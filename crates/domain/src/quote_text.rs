// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Plain-text rendering of a quote, suitable for pasting into a chat message.
//!
//! Section order is fixed: header, labor, included materials, overage,
//! special tasks, totals, footer.

use crate::number::{format_money, format_number};
use crate::quote::{ExtraLine, QuoteBreakdown, SpecialLine};

const FOOTER: [&str; 4] = [
    "หมายเหตุ:",
    "- ราคานี้เป็นราคาประเมินเบื้องต้น อาจเปลี่ยนแปลงตามหน้างานจริง",
    "- ราคารวมค่าแรงและวัสดุมาตรฐานตามรายการข้างต้น ไม่รวมภาษีมูลค่าเพิ่ม",
    "- ใบเสนอราคามีอายุ 30 วันนับจากวันที่ออก",
];

/// Renders a quote as multi-line text.
///
/// The output is deterministic for a given breakdown. Overage lines with no
/// extra length render as `ไม่เกิน (0 บาท)`.
#[must_use]
pub fn format_quote_as_text(quote: &QuoteBreakdown) -> String {
    let meta = &quote.meta;
    let labor = &quote.base_labor;
    let ac_type: &str = if meta.ac_type.is_empty() {
        "-"
    } else {
        meta.ac_type.as_str()
    };

    let mut lines: Vec<String> = vec![
        String::from("ใบเสนอราคาติดตั้งเครื่องปรับอากาศ"),
        format!("ประเภท: {ac_type}"),
        format!("ขนาด: {} BTU", format_money(i64::from(meta.btu))),
        format!("จำนวน: {} เครื่อง", meta.machine_count),
        String::new(),
        format!("ค่าแรงติดตั้ง ({})", labor.label),
        format!(
            "- {} บาท/เครื่อง (ช่วงราคา {} - {} บาท)",
            format_money(labor.standard),
            format_money(labor.min),
            format_money(labor.max)
        ),
        String::new(),
        String::from("วัสดุมาตรฐานที่รวมในราคา:"),
    ];

    for line in quote.extras.lines() {
        lines.push(format!(
            "- {} {} เมตร",
            line.material.label(),
            format_number(line.included_m, 1)
        ));
    }
    lines.push(String::new());

    lines.push(String::from("ค่าวัสดุส่วนเกิน:"));
    for line in quote.extras.lines() {
        lines.push(format!("- {}: {}", line.material.label(), extra_text(line)));
    }
    lines.push(format!(
        "รวมค่าส่วนเกิน: {} บาท",
        format_money(quote.extras.total)
    ));
    lines.push(String::new());

    lines.push(String::from("งานพิเศษ:"));
    if quote.specials.lines.is_empty() {
        lines.push(String::from("- ไม่มี"));
    } else {
        lines.extend(
            quote
                .specials
                .lines
                .iter()
                .map(|line| format!("- {}", special_text(line))),
        );
        lines.push(format!(
            "รวมค่างานพิเศษ: {} บาท",
            format_money(quote.specials.total)
        ));
    }
    lines.push(String::new());

    lines.push(format!(
        "ราคาต่อเครื่อง: {} บาท",
        format_money(quote.totals.per_machine)
    ));
    lines.push(format!(
        "รวมทั้งสิ้น ({} เครื่อง): {} บาท",
        meta.machine_count,
        format_money(quote.totals.grand)
    ));
    lines.push(String::new());

    lines.extend(FOOTER.iter().map(|line| (*line).to_string()));
    lines.join("\n")
}

fn extra_text(line: &ExtraLine) -> String {
    if line.extra_m <= 0.0 {
        return String::from("ไม่เกิน (0 บาท)");
    }

    let extra: String = format_number(line.extra_m, 1);
    line.note.as_ref().map_or_else(
        || {
            format!(
                "เกิน {extra} เมตร x {} บาท = {} บาท",
                format_money(line.rate_per_meter),
                format_money(line.cost)
            )
        },
        |note| format!("เกิน {extra} เมตร ({note}) = {} บาท", format_money(line.cost)),
    )
}

fn special_text(line: &SpecialLine) -> String {
    if line.unit == crate::quote::Unit::Job {
        return format!("{}: {} บาท", line.label, format_money(line.cost));
    }

    format!(
        "{}: {} {} x {} บาท = {} บาท",
        line.label,
        format_number(line.quantity, 1),
        line.unit.label(),
        format_money(line.unit_price),
        format_money(line.cost)
    )
}
