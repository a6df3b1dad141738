//! Writing [`NetConnectionCommand`] results.

use std::io;

use super::NetConnectionCommand;
use crate::amf0::{Amf0Encoder, Amf0Value};
use crate::command_messages::error::CommandError;

impl NetConnectionCommand {
    /// Writes a [`NetConnectionCommand`] to `buf`. Only the `_result` variants can be written by
    /// this server; the request variants are inbound-only.
    pub fn write(self, buf: &mut impl io::Write, transaction_id: f64) -> Result<(), CommandError> {
        match self {
            Self::ConnectResult {
                fmsver,
                capabilities,
                level,
                code,
                description,
                encoding,
            } => {
                Amf0Encoder::encode_string(buf, "_result")?;
                Amf0Encoder::encode_number(buf, transaction_id)?;
                Amf0Encoder::encode_value(
                    buf,
                    &Amf0Value::Object(vec![
                        ("fmsVer".to_string(), Amf0Value::String(fmsver)),
                        ("capabilities".to_string(), Amf0Value::Number(capabilities)),
                    ]),
                )?;
                Amf0Encoder::encode_value(
                    buf,
                    &Amf0Value::Object(vec![
                        ("level".to_string(), Amf0Value::String(level.as_str().to_string())),
                        ("code".to_string(), Amf0Value::String(code)),
                        ("description".to_string(), Amf0Value::String(description)),
                        ("objectEncoding".to_string(), Amf0Value::Number(encoding)),
                    ]),
                )?;
            }
            Self::CreateStreamResult { stream_id } => {
                Amf0Encoder::encode_string(buf, "_result")?;
                Amf0Encoder::encode_number(buf, transaction_id)?;
                Amf0Encoder::encode_null(buf)?;
                Amf0Encoder::encode_number(buf, stream_id)?;
            }
            Self::Connect { .. } | Self::ReleaseStream { .. } | Self::FcPublish { .. } | Self::CreateStream => {
                unreachable!("request variants of NetConnectionCommand are never written by the server")
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::amf0::Amf0Decoder;
    use crate::command_messages::define::CommandResultLevel;

    #[test]
    fn connect_result_wire_shape() {
        let mut buf = Vec::new();

        NetConnectionCommand::ConnectResult {
            fmsver: "FMS/3,0,1,123".to_string(),
            capabilities: 31.0,
            level: CommandResultLevel::Status,
            code: "NetConnection.Connect.Success".to_string(),
            description: "Connection succeeded.".to_string(),
            encoding: 0.0,
        }
        .write(&mut buf, 1.0)
        .unwrap();

        let mut decoder = Amf0Decoder::new(&buf);
        let values = decoder.decode_all().unwrap();
        assert_eq!(values.len(), 4);
        assert_eq!(values[0].as_str(), Some("_result"));
        assert_eq!(values[1].as_f64(), Some(1.0));
        assert_eq!(values[2].get("capabilities").and_then(|v| v.as_f64()), Some(31.0));
        assert_eq!(
            values[3].get("code").and_then(|v| v.as_str()),
            Some("NetConnection.Connect.Success")
        );
    }

    #[test]
    fn create_stream_result_wire_shape() {
        let mut buf = Vec::new();

        NetConnectionCommand::CreateStreamResult { stream_id: 1.0 }.write(&mut buf, 4.0).unwrap();

        let mut decoder = Amf0Decoder::new(&buf);
        let values = decoder.decode_all().unwrap();
        assert_eq!(values.len(), 4);
        assert_eq!(values[0].as_str(), Some("_result"));
        assert_eq!(values[1].as_f64(), Some(4.0));
        assert_eq!(values[3].as_f64(), Some(1.0));
    }
}
