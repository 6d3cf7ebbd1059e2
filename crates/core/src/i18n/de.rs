use super::{DialogCopy, FieldCopy, ProjectNames, StepCopy, Translations};

pub(super) static TRANSLATIONS: Translations = Translations {
    welcome_greeting: "👋 Hallo {name}, willkommen bei {team}!",
    welcome_intro: "Ich bin dein Onboarding-Assistent. Ich führe dich durch ein paar schnelle Schritte, um dich einzurichten.",
    welcome_closing: "_Du kannst jederzeit zu dieser DM zurückkehren, um deinen Fortschritt zu sehen._",

    accounts: StepCopy {
        title: "Schritt 1: Konten & Zugang",
        description: "Stelle sicher, dass du dich überall anmelden kannst, wo du es benötigst:\n\
            - Google Workspace (EOTO E-Mail-Adresse ausgegeben & getestet)\n\
            - Nextcloud (Dateien & gemeinsame Team-Ordner)\n\
            - Timebutler (Zeiterfassung / Anwesenheit)\n\
            - Mattermost (du bist hier 🎉)\n\
            - Alle rollenspezifischen Tools (z.B. CRM, Finanztools)\n\n\
            Mehr Details: ",
        link: "[Konten & Zugang Leitfaden](https://outline.akinlosotu.tech)",
        button: "Konten bereit markieren",
    },
    profile: StepCopy {
        title: "Schritt 2: Vervollständige dein Profil",
        description: "Hilf Kollegen, dich leicht zu erkennen und zu erreichen:\n\
            - Lade ein klares Profilfoto hoch\n\
            - Füge deinen vollständigen Namen und Pronomen hinzu (falls gewünscht)\n\
            - Lege deinen Jobtitel & deine Abteilung fest\n\
            - Stelle deine Zeitzone und Arbeitszeiten ein\n\
            - Generiere deine E-Mail-Signatur ✉️\n\n\
            Schnellreferenz: ",
        link: "[Mattermost Profil & Benachrichtigungen](https://outline.akinlosotu.tech)",
        button: "Profil vollständig markieren",
    },
    channels: StepCopy {
        title: "Schritt 3: Kommunikationskanäle",
        description: "Tritt den Räumen bei, in denen Informationen fließen:\n\
            - `#announcements`: organisationsweite Updates\n\
            - `#helpdesk`: IT-Support & schnelle Fragen\n\
            - `#introductions`: sag allen Hallo\n\
            - Deine Team- / Projektkanäle (frage deinen Manager)\n\n\
            Richtlinien: ",
        link: "[Kommunikation & Kanäle](https://outline.akinlosotu.tech)",
        button: "Kanäle beigetreten markieren",
    },
    tools: StepCopy {
        title: "Schritt 4: Tools & Ausrüstung",
        description: "Bestätige, dass deine Hardware und Kerntools bereit sind:\n\
            - Laptop erhalten, startet korrekt und du kannst dich anmelden\n\
            - WLAN-Zugang an deinem üblichen Arbeitsort(en)\n\
            - Nextcloud-Client installiert (falls erforderlich)\n\
            - E-Mail & Kalender funktionieren auf deinem Hauptgerät\n\
            - Erforderliches VPN oder Fernzugriff konfiguriert\n\n\
            Siehe: ",
        link: "[Geräte & IT-Einrichtung](https://outline.akinlosotu.tech)",
        button: "Tools bereit markieren",
    },
    policies: StepCopy {
        title: "Schritt 5: Arbeitsweisen & Richtlinien",
        description: "Mache einen ersten Durchgang durch die Arbeitsweise bei EOTO:\n\
            - Arbeitszeiten, Gleitzeit und Urlaubsprozess\n\
            - Datenschutz-Grundlagen (DSGVO-Bewusstsein)\n\
            - Kommunikationserwartungen (Antwortzeiten, DM vs. Kanäle)\n\
            - Wie wir Dateien speichern und teilen (Nextcloud-Struktur)\n\n\
            Beginne hier: ",
        link: "[EOTO Handbuch](https://outline.akinlosotu.tech)",
        button: "Richtlinien überprüft markieren",
    },
    intro: StepCopy {
        title: "Schritt 6: Menschen & Check-ins",
        description: "Stelle sicher, dass du mit den richtigen Menschen verbunden bist:\n\
            - Kurzer Vorstellungsbeitrag in `#introductions`\n\
            - 1:1-Vorstellung mit deinem Manager (geplant)\n\
            - Check-in mit deinem Onboarding-Buddy (falls zugewiesen)\n\
            - Füge wichtige Personen zu deinen Favoriten in Mattermost hinzu\n\n\
            Tipps: ",
        link: "[Onboarding & Zusammenarbeit bei EOTO](https://outline.akinlosotu.tech)",
        button: "Vorstellungen erledigt markieren",
    },
    button_generate_signature: "✉️ E-Mail-Signatur generieren",

    dialog: DialogCopy {
        title: "EOTO E-Mail-Signatur generieren",
        intro: "Fülle deine Details aus, um deine EOTO E-Mail-Signatur zu generieren:",
        full_name: "Vollständiger Name",
        full_name_help: "Dein vollständiger Name, wie er in der Signatur erscheinen soll",
        position: "Position",
        position_help: "Dein Jobtitel oder deine Rolle bei EOTO",
        pronouns: "Pronomen",
        pronouns_placeholder: "er/ihm / he/him",
        pronouns_help: "Format: 'er/ihm / he/him' oder 'sie/ihr / she/her' oder 'Keine Pronomen / No Pronouns'",
        email: "E-Mail",
        email_help: "Deine EOTO E-Mail-Adresse",
        project: "Projekt",
        project_help: "Wähle das EOTO-Projekt aus, für das du arbeitest",
        work_number: "Arbeitsnummer",
        work_number_placeholder: "Tel.: 030 12345678",
        work_number_help: "Deine Arbeitstelefonnummer (optional, füge 'Tel.:' Präfix hinzu)",
        submit: "Signatur generieren",
    },
    projects: ProjectNames {
        each_one: "Each One",
        community: "CommUnity",
        cuz: "CommUnity Zentrum (CUZ)",
        jugend: "Jugendangebote",
        nar: "Netzwerk-Antirassismus (NAR)",
        afrolution: "Afrolution",
    },
    fields: FieldCopy {
        full_name_required: "Vollständiger Name ist erforderlich",
        position_required: "Position ist erforderlich",
        email_required: "E-Mail ist erforderlich",
        project_required: "Projekt ist erforderlich",
        project_unknown: "Bitte wähle eines der aufgeführten Projekte",
    },

    signature_generated_title: "✅ **EOTO E-Mail-Signatur erfolgreich generiert!**",
    signature_generated_message: "Hallo {name}, deine E-Mail-Signatur für **{project}** ist einsatzbereit.\n\n\
        **So verwendest du diese Signatur:**\n\
        1. Lade die HTML-Datei unten herunter\n\
        2. Öffne sie in einem Webbrowser\n\
        3. Wähle den gesamten Inhalt aus (Strg+A / Cmd+A)\n\
        4. Kopieren (Strg+C / Cmd+C)\n\
        5. Füge in die Signatureinstellungen deines E-Mail-Clients ein\n\n",
    signature_instructions_title: "**Für Outlook:**\n",
    signature_instructions_outlook: "- Öffne Outlook → Datei → Optionen → E-Mail → Signaturen\n\
        - Erstelle eine neue Signatur, füge den kopierten Inhalt ein\n\n",
    signature_instructions_thunderbird: "**Für Thunderbird:**\n\
        - Extras → Konten-Einstellungen → Wähle deine E-Mail → Signatur aus Datei anhängen\n\
        - Wähle die heruntergeladene HTML-Datei\n\n",
    signature_project_footer: "_Projekt: {project}_",
    signature_render_failed: "Signatur konnte nicht generiert werden. Bitte versuche es erneut.",
    signature_upload_failed: "Signaturdatei konnte nicht hochgeladen werden. Bitte versuche es erneut.",

    step_marked_complete: "Schritt '{step}' als erledigt markiert ✔️",
    dialog_opening: "EOTO Signaturgenerator wird geöffnet...",
};
