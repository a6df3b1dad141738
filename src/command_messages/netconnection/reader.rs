//! Reading [`NetConnectionCommand`].

use super::NetConnectionCommand;
use crate::amf0::Amf0Decoder;
use crate::command_messages::error::CommandError;

impl NetConnectionCommand {
    /// Reads a [`NetConnectionCommand`] from the given decoder, having already consumed the
    /// command name and transaction id.
    ///
    /// Returns `Ok(None)` if `command_name` is not recognized.
    pub fn read(command_name: &str, decoder: &mut Amf0Decoder) -> Result<Option<Self>, CommandError> {
        match command_name {
            "connect" => {
                let command_object = decoder.decode_value()?;
                let app = command_object
                    .get("app")
                    .and_then(|v| v.as_str())
                    .ok_or(CommandError::MissingField("app"))?
                    .to_owned();
                Ok(Some(Self::Connect { app }))
            }
            "releaseStream" => {
                decoder.decode_null()?;
                let stream_name = decoder.decode_string()?;
                Ok(Some(Self::ReleaseStream { stream_name }))
            }
            "FCPublish" => {
                decoder.decode_null()?;
                let stream_name = decoder.decode_string()?;
                Ok(Some(Self::FcPublish { stream_name }))
            }
            "createStream" => {
                decoder.decode_null()?;
                Ok(Some(Self::CreateStream))
            }
            _ => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::amf0::{Amf0Encoder, Amf0Value};

    #[test]
    fn read_connect_extracts_app() {
        let mut buf = Vec::new();
        Amf0Encoder::encode_value(
            &mut buf,
            &Amf0Value::Object(vec![
                ("app".to_string(), Amf0Value::String("live".to_string())),
                ("type".to_string(), Amf0Value::String("nonprivate".to_string())),
            ]),
        )
        .unwrap();

        let mut decoder = Amf0Decoder::new(&buf);
        let command = NetConnectionCommand::read("connect", &mut decoder).unwrap().unwrap();
        assert!(matches!(command, NetConnectionCommand::Connect { app } if app == "live"));
    }

    #[test]
    fn read_connect_missing_app_is_error() {
        let mut buf = Vec::new();
        Amf0Encoder::encode_value(&mut buf, &Amf0Value::Object(vec![])).unwrap();

        let mut decoder = Amf0Decoder::new(&buf);
        let err = NetConnectionCommand::read("connect", &mut decoder).unwrap_err();
        assert!(matches!(err, CommandError::MissingField("app")));
    }

    #[test]
    fn read_release_stream() {
        let mut buf = Vec::new();
        Amf0Encoder::encode_null(&mut buf).unwrap();
        Amf0Encoder::encode_string(&mut buf, "mystream").unwrap();

        let mut decoder = Amf0Decoder::new(&buf);
        let command = NetConnectionCommand::read("releaseStream", &mut decoder).unwrap().unwrap();
        assert!(matches!(command, NetConnectionCommand::ReleaseStream { stream_name } if stream_name == "mystream"));
    }

    #[test]
    fn read_create_stream() {
        let mut buf = Vec::new();
        Amf0Encoder::encode_null(&mut buf).unwrap();

        let mut decoder = Amf0Decoder::new(&buf);
        let command = NetConnectionCommand::read("createStream", &mut decoder).unwrap().unwrap();
        assert!(matches!(command, NetConnectionCommand::CreateStream));
    }

    #[test]
    fn unrecognized_name_is_none() {
        let mut decoder = Amf0Decoder::new(&[]);
        assert!(NetConnectionCommand::read("pause", &mut decoder).unwrap().is_none());
    }
}
