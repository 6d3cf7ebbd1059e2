use super::{DialogCopy, FieldCopy, ProjectNames, StepCopy, Translations};

pub(super) static TRANSLATIONS: Translations = Translations {
    welcome_greeting: "👋 Hi {name}, welcome to {team}!",
    welcome_intro: "I'm your onboarding assistant. I'll guide you through a few quick steps to get set up.",
    welcome_closing: "_You can come back to this DM anytime to see your progress._",

    accounts: StepCopy {
        title: "Step 1: Accounts & Access",
        description: "Make sure you can log in everywhere you need to:\n\
            - Google Workspace (EOTO email address issued & tested)\n\
            - Nextcloud (files & shared team folders)\n\
            - Timebutler (time tracking / attendance)\n\
            - Mattermost (you're here 🎉)\n\
            - Any role-specific tools (e.g. CRM, finance tools)\n\n\
            More details: ",
        link: "[Accounts & Access Guide](https://outline.akinlosotu.tech)",
        button: "Mark Accounts Ready",
    },
    profile: StepCopy {
        title: "Step 2: Complete Your Profile",
        description: "Help colleagues recognize and reach you easily:\n\
            - Upload a clear profile photo\n\
            - Add your full name and pronouns (if desired)\n\
            - Set your job title & department\n\
            - Configure your timezone and working hours\n\
            - Generate your email signature ✉️\n\n\
            Quick reference: ",
        link: "[Mattermost Profile & Notifications](https://outline.akinlosotu.tech)",
        button: "Mark Profile Complete",
    },
    channels: StepCopy {
        title: "Step 3: Communication Channels",
        description: "Join the spaces where information flows:\n\
            - `#announcements`: organization-wide updates\n\
            - `#helpdesk`: IT support & quick questions\n\
            - `#introductions`: say hello to everyone\n\
            - Your team / project channels (ask your manager)\n\n\
            Guidelines: ",
        link: "[Communication & Channels](https://outline.akinlosotu.tech)",
        button: "Mark Channels Joined",
    },
    tools: StepCopy {
        title: "Step 4: Tools & Equipment",
        description: "Confirm your hardware and core tools are ready:\n\
            - Laptop received, boots correctly, and you can log in\n\
            - Wi-Fi access at your usual work location(s)\n\
            - Nextcloud client installed (if required)\n\
            - Email & calendar working on your primary device\n\
            - Required VPN or remote access configured\n\n\
            See: ",
        link: "[Devices & IT Setup](https://outline.akinlosotu.tech)",
        button: "Mark Tools Ready",
    },
    policies: StepCopy {
        title: "Step 5: Work Practices & Policies",
        description: "Take an initial pass through how we work at EOTO:\n\
            - Working hours, flextime, and vacation process\n\
            - Privacy & data protection basics (GDPR awareness)\n\
            - Communication expectations (response times, DM vs. channels)\n\
            - How we store and share files (Nextcloud structure)\n\n\
            Start here: ",
        link: "[EOTO Handbook](https://outline.akinlosotu.tech)",
        button: "Mark Policies Reviewed",
    },
    intro: StepCopy {
        title: "Step 6: People & Check-ins",
        description: "Make sure you're connected with the right people:\n\
            - Brief introduction post in `#introductions`\n\
            - 1:1 intro meeting with your manager (scheduled)\n\
            - Check-in with your onboarding buddy (if assigned)\n\
            - Add key people to your favorites in Mattermost\n\n\
            Tips: ",
        link: "[Onboarding & Collaboration at EOTO](https://outline.akinlosotu.tech)",
        button: "Mark Intros Done",
    },
    button_generate_signature: "✉️ Generate Email Signature",

    dialog: DialogCopy {
        title: "Generate EOTO Email Signature",
        intro: "Fill in your details to generate your EOTO email signature:",
        full_name: "Full Name",
        full_name_help: "Your full name as it should appear in the signature",
        position: "Position",
        position_help: "Your job title or role at EOTO",
        pronouns: "Pronouns",
        pronouns_placeholder: "she/her / sie/ihr",
        pronouns_help: "Format: 'he/him / er/ihm' or 'she/her / sie/ihr' or 'No Pronouns / Keine Pronomen'",
        email: "Email",
        email_help: "Your EOTO email address",
        project: "Project",
        project_help: "Select the EOTO project you're working for",
        work_number: "Work Number",
        work_number_placeholder: "Tel.: 030 12345678",
        work_number_help: "Your work phone number (optional, include 'Tel.:' prefix)",
        submit: "Generate Signature",
    },
    projects: ProjectNames {
        each_one: "Each One",
        community: "CommUnity",
        cuz: "CommUnity Zentrum (CUZ)",
        jugend: "Youth Programs",
        nar: "Network-Antiracism (NAR)",
        afrolution: "Afrolution",
    },
    fields: FieldCopy {
        full_name_required: "Full name is required",
        position_required: "Position is required",
        email_required: "Email is required",
        project_required: "Project is required",
        project_unknown: "Please pick one of the listed projects",
    },

    signature_generated_title: "✅ **EOTO Email Signature Successfully Generated!**",
    signature_generated_message: "Hi {name}, your email signature for **{project}** is ready to use.\n\n\
        **How to use this signature:**\n\
        1. Download the HTML file below\n\
        2. Open it in a web browser\n\
        3. Select all content (Ctrl+A / Cmd+A)\n\
        4. Copy (Ctrl+C / Cmd+C)\n\
        5. Paste into your email client's signature settings\n\n",
    signature_instructions_title: "**For Outlook:**\n",
    signature_instructions_outlook: "- Open Outlook → File → Options → Mail → Signatures\n\
        - Create a new signature, paste the copied content\n\n",
    signature_instructions_thunderbird: "**For Thunderbird:**\n\
        - Tools → Account Settings → Select your email → Attach signature from file\n\
        - Select the downloaded HTML file\n\n",
    signature_project_footer: "_Project: {project}_",
    signature_render_failed: "Failed to generate signature. Please try again.",
    signature_upload_failed: "Failed to upload signature file. Please try again.",

    step_marked_complete: "Marked step '{step}' complete ✔️",
    dialog_opening: "Opening EOTO signature generator...",
};
