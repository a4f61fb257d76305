use crate::constants::MQTT_STRING_MAX_LEN;
use crate::validate::{check_len, check_non_empty, Error};

/// Checks that `topic` can be used as the topic of a PUBLISH packet.
///
/// Publishers may not use the `+` and `#` filter wildcards, and MQTT strings
/// carry a two byte length and must not contain U+0000.
pub fn check_topic_name(field: &'static str, topic: &str) -> Result<(), Error> {
    check_non_empty(field, topic)?;
    check_len(field, topic, MQTT_STRING_MAX_LEN)?;

    if topic.contains(['+', '#']) {
        return Err(Error::TopicWildcard(field));
    }
    if topic.contains('\0') {
        return Err(Error::InteriorNul(field));
    }

    Ok(())
}

pub fn is_valid_topic_name(topic: &str) -> bool {
    check_topic_name("topic", topic).is_ok()
}
