//! Date, time, and duration emission.
//!
//! Two styles: component-wise constructor calls (the default) or a parse
//! call against the canonical string form. Offset-carrying datetimes always
//! parse, since a component call would drop the offset.

use chrono::{DateTime, Datelike, FixedOffset, Local, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Timelike, Utc};

use super::{KnownTypeVisitor, VisitScope};
use crate::descriptor::TypeDescriptor;
use crate::inspector::TypeSchema;
use crate::options::{DateKind, DateTimeInstantiation, IntegerFormat};
use crate::reflect::Reflect;
use crate::writer::{Callee, CodeWriter, Emit, Literal, emit};

/// Renders `chrono` date/time values and durations.
pub struct DateTimeVisitor;

impl KnownTypeVisitor for DateTimeVisitor {
    fn is_suitable_for(&self, value: &dyn Reflect, _schema: Option<&TypeSchema>) -> bool {
        value.is::<NaiveDate>()
            || value.is::<NaiveTime>()
            || value.is::<NaiveDateTime>()
            || value.is::<DateTime<Utc>>()
            || value.is::<DateTime<FixedOffset>>()
            || value.is::<DateTime<Local>>()
            || value.is::<TimeDelta>()
            || value.is::<std::time::Duration>()
    }

    fn visit(&self, scope: &mut VisitScope<'_, '_>) {
        let style = scope.options().date_time_instantiation;
        let date_kind = scope.options().date_kind;
        let ty = TypeDescriptor::parse(scope.value.type_path());
        let value = scope.value;
        let writer = &mut *scope.writer;

        if let Some(delta) = value.downcast_ref::<TimeDelta>() {
            duration_call(writer, &ty, delta.num_milliseconds() as i128);
            return;
        }
        if let Some(duration) = value.downcast_ref::<std::time::Duration>() {
            duration_call(writer, &ty, duration.as_millis() as i128);
            return;
        }

        if let Some(date) = value.downcast_ref::<NaiveDate>() {
            match style {
                DateTimeInstantiation::Parse => parse_call(writer, &ty, date.to_string()),
                DateTimeInstantiation::New => invoke(
                    writer,
                    &ty,
                    "from_ymd",
                    vec![
                        int(i128::from(date.year())),
                        int(i128::from(date.month())),
                        int(i128::from(date.day())),
                    ],
                ),
            }
            return;
        }

        if let Some(time) = value.downcast_ref::<NaiveTime>() {
            match style {
                DateTimeInstantiation::Parse => parse_call(writer, &ty, time.to_string()),
                DateTimeInstantiation::New => {
                    let milli = time.nanosecond() / 1_000_000;
                    let mut args = vec![
                        int(i128::from(time.hour())),
                        int(i128::from(time.minute())),
                        int(i128::from(time.second())),
                    ];
                    let method = if milli != 0 {
                        args.push(int(i128::from(milli)));
                        "from_hms_milli"
                    } else {
                        "from_hms"
                    };
                    invoke(writer, &ty, method, args);
                }
            }
            return;
        }

        if let Some(datetime) = value.downcast_ref::<NaiveDateTime>() {
            match style {
                DateTimeInstantiation::Parse => parse_call(writer, &ty, datetime.to_string()),
                DateTimeInstantiation::New => {
                    let mut args = ymd_hms(datetime);
                    match date_kind {
                        DateKind::Unspecified => {}
                        DateKind::Utc => args.push(kind_arg("Utc")),
                        DateKind::Local => args.push(kind_arg("Local")),
                    }
                    invoke(writer, &ty, "from_ymd_hms", args);
                }
            }
            return;
        }

        if let Some(datetime) = value.downcast_ref::<DateTime<Utc>>() {
            match style {
                DateTimeInstantiation::Parse => parse_call(writer, &ty, datetime.to_rfc3339()),
                DateTimeInstantiation::New => {
                    let mut args = ymd_hms(&datetime.naive_utc());
                    args.push(kind_arg("Utc"));
                    invoke(writer, &ty, "from_ymd_hms", args);
                }
            }
            return;
        }

        // Offset-carrying forms keep their offset only through the string.
        if let Some(datetime) = value.downcast_ref::<DateTime<FixedOffset>>() {
            parse_call(writer, &ty, datetime.to_rfc3339());
            return;
        }
        if let Some(datetime) = value.downcast_ref::<DateTime<Local>>() {
            parse_call(writer, &ty, datetime.to_rfc3339());
        }
    }
}

fn ymd_hms<'a>(datetime: &NaiveDateTime) -> Vec<Emit<'a>> {
    vec![
        int(i128::from(datetime.year())),
        int(i128::from(datetime.month())),
        int(i128::from(datetime.day())),
        int(i128::from(datetime.hour())),
        int(i128::from(datetime.minute())),
        int(i128::from(datetime.second())),
    ]
}

fn int<'a>(value: i128) -> Emit<'a> {
    emit(move |writer| writer.literal(&Literal::Int(value), &IntegerFormat::default()))
}

fn kind_arg<'a>(name: &'static str) -> Emit<'a> {
    let ty = TypeDescriptor::named("DateTimeKind");
    emit(move |writer| writer.member_reference(Some(&ty), name))
}

fn invoke(writer: &mut dyn CodeWriter, ty: &TypeDescriptor, method: &str, args: Vec<Emit<'_>>) {
    writer.method_invoke(Callee::Static { ty, method }, args);
}

fn parse_call(writer: &mut dyn CodeWriter, ty: &TypeDescriptor, text: String) {
    let arg = emit(move |w| w.literal(&Literal::Str(text), &IntegerFormat::default()));
    writer.method_invoke(Callee::Static { ty, method: "parse" }, vec![arg]);
}

/// Seconds when the value divides evenly, milliseconds otherwise.
fn duration_call(writer: &mut dyn CodeWriter, ty: &TypeDescriptor, millis: i128) {
    if millis % 1_000 == 0 {
        invoke(writer, ty, "from_secs", vec![int(millis / 1_000)]);
    } else {
        invoke(writer, ty, "from_millis", vec![int(millis)]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claims_chrono_and_std_time() {
        let visitor = DateTimeVisitor;
        let date = NaiveDate::from_ymd_opt(2024, 5, 17).unwrap();
        assert!(visitor.is_suitable_for(&date, None));
        assert!(visitor.is_suitable_for(&Utc::now(), None));
        assert!(visitor.is_suitable_for(&TimeDelta::seconds(3), None));
        assert!(visitor.is_suitable_for(&std::time::Duration::from_secs(3), None));
        assert!(!visitor.is_suitable_for(&42i32, None));
    }
}
