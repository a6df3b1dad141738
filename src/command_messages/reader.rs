//! Reading [`Command`].

use super::netconnection::NetConnectionCommand;
use super::netstream::NetStreamCommand;
use super::{Command, CommandType};
use crate::amf0::Amf0Decoder;
use crate::command_messages::error::CommandError;

impl Command {
    /// Reads a [`Command`] from a full `CommandAMF0` message payload.
    pub fn read(payload: &[u8]) -> Result<Self, CommandError> {
        let mut decoder = Amf0Decoder::new(payload);

        let name = decoder.decode_string()?;
        let transaction_id = decoder.decode_number()?;

        let command_type = Self::read_command_type(&name, &mut decoder)?;

        Ok(Self {
            transaction_id,
            command_type,
        })
    }

    fn read_command_type(name: &str, decoder: &mut Amf0Decoder) -> Result<CommandType, CommandError> {
        if let Some(command) = NetConnectionCommand::read(name, decoder)? {
            return Ok(CommandType::NetConnection(command));
        }

        if let Some(command) = NetStreamCommand::read(name, decoder)? {
            return Ok(CommandType::NetStream(command));
        }

        let values = decoder.decode_all()?;
        Ok(CommandType::Unknown {
            name: name.to_owned(),
            values,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::amf0::{Amf0Encoder, Amf0Value};

    #[test]
    fn read_connect_command() {
        let mut buf = Vec::new();
        Amf0Encoder::encode_string(&mut buf, "connect").unwrap();
        Amf0Encoder::encode_number(&mut buf, 1.0).unwrap();
        Amf0Encoder::encode_value(
            &mut buf,
            &Amf0Value::Object(vec![("app".to_string(), Amf0Value::String("live".to_string()))]),
        )
        .unwrap();

        let command = Command::read(&buf).unwrap();
        assert_eq!(command.transaction_id, 1.0);
        assert!(matches!(
            command.command_type,
            CommandType::NetConnection(NetConnectionCommand::Connect { app }) if app == "live"
        ));
    }

    #[test]
    fn read_publish_command() {
        let mut buf = Vec::new();
        Amf0Encoder::encode_string(&mut buf, "publish").unwrap();
        Amf0Encoder::encode_number(&mut buf, 0.0).unwrap();
        Amf0Encoder::encode_null(&mut buf).unwrap();
        Amf0Encoder::encode_string(&mut buf, "mystream").unwrap();
        Amf0Encoder::encode_string(&mut buf, "live").unwrap();

        let command = Command::read(&buf).unwrap();
        assert!(matches!(command.command_type, CommandType::NetStream(NetStreamCommand::Publish { .. })));
    }

    #[test]
    fn read_unknown_command_is_forwarded() {
        let mut buf = Vec::new();
        Amf0Encoder::encode_string(&mut buf, "checkBandwidth").unwrap();
        Amf0Encoder::encode_number(&mut buf, 2.0).unwrap();
        Amf0Encoder::encode_null(&mut buf).unwrap();

        let command = Command::read(&buf).unwrap();
        match command.command_type {
            CommandType::Unknown { name, values } => {
                assert_eq!(name, "checkBandwidth");
                assert_eq!(values, vec![Amf0Value::Null]);
            }
            _ => panic!("expected Unknown"),
        }
    }
}
